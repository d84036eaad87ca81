use std::net::SocketAddr;

use anyhow::{Context, Result};
use payload_redactor_engine::{KeywordSet, RedactionEngine, RedactionMode, RedactionPolicy};
use payload_redactor_gateway::{GatewayConfig, GatewayServer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

pub const BENCH_KEYWORDS: &[&str] = &["password", "token", "apiKey", "ssn"];

const PLAIN_KEYS: &[&str] = &["id", "name", "email", "region", "count", "enabled"];

/// Shape of a generated payload.
#[derive(Debug, Clone, Copy)]
pub struct PayloadShape {
    /// Container nesting below the root object.
    pub depth: usize,
    /// Keys per object and elements per array.
    pub width: usize,
    /// Probability that a generated key is sensitive.
    pub sensitive_ratio: f64,
}

impl PayloadShape {
    pub const SMALL: PayloadShape = PayloadShape {
        depth: 2,
        width: 4,
        sensitive_ratio: 0.2,
    };
    pub const MEDIUM: PayloadShape = PayloadShape {
        depth: 4,
        width: 5,
        sensitive_ratio: 0.1,
    };
    pub const LARGE: PayloadShape = PayloadShape {
        depth: 5,
        width: 6,
        sensitive_ratio: 0.05,
    };
}

pub struct PayloadFixture {
    pub value: Value,
    pub bytes: Vec<u8>,
}

impl PayloadFixture {
    /// Generates a deterministic payload for `shape` from `seed`.
    pub fn new(shape: PayloadShape, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let value = generate_object(&mut rng, shape, shape.depth);
        let bytes = serde_json::to_vec(&value).expect("serialize generated payload");
        Self { value, bytes }
    }
}

pub fn bench_engine(mode: RedactionMode) -> RedactionEngine {
    RedactionEngine::new(
        RedactionPolicy::new(KeywordSet::new(BENCH_KEYWORDS.iter().copied()), mode)
            .with_max_depth(64),
    )
    .expect("bench policy is valid")
}

fn generate_object(rng: &mut StdRng, shape: PayloadShape, remaining: usize) -> Value {
    let mut map = Map::with_capacity(shape.width);
    for index in 0..shape.width {
        let key = if rng.gen_bool(shape.sensitive_ratio) {
            BENCH_KEYWORDS[rng.gen_range(0..BENCH_KEYWORDS.len())].to_string()
        } else {
            format!("{}_{index}", PLAIN_KEYS[rng.gen_range(0..PLAIN_KEYS.len())])
        };
        map.insert(key, generate_value(rng, shape, remaining));
    }
    Value::Object(map)
}

fn generate_value(rng: &mut StdRng, shape: PayloadShape, remaining: usize) -> Value {
    if remaining == 0 {
        return generate_scalar(rng);
    }
    match rng.gen_range(0..4) {
        0 => generate_object(rng, shape, remaining - 1),
        1 => Value::Array(
            (0..shape.width)
                .map(|_| generate_value(rng, shape, remaining - 1))
                .collect(),
        ),
        _ => generate_scalar(rng),
    }
}

fn generate_scalar(rng: &mut StdRng) -> Value {
    match rng.gen_range(0..5) {
        0 => Value::Null,
        1 => json!(rng.gen_bool(0.5)),
        2 => json!(rng.gen_range(0..1_000_000_u64)),
        3 => json!(rng.gen_range(-1000.0..1000.0_f64)),
        _ => json!(format!("value-{}", rng.gen_range(0..10_000_u32))),
    }
}

/// A gateway running on an ephemeral port inside its own runtime.
pub struct GatewayBenchFixture {
    pub runtime: Runtime,
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl GatewayBenchFixture {
    pub fn start(mode: RedactionMode) -> Result<Self> {
        let runtime = Runtime::new().context("building tokio runtime")?;
        let config = GatewayConfig {
            redaction_mode: mode,
            sensitive_keywords: BENCH_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_body_size_bytes: 16 * 1024 * 1024,
            log_level: "error".to_string(),
            ..GatewayConfig::default()
        };
        let server = GatewayServer::new(config)?;

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .context("binding gateway listener")?;
        let addr: SocketAddr = listener.local_addr().context("reading gateway address")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        runtime.spawn(server.serve(listener, async {
            let _ = shutdown_rx.await;
        }));

        Ok(Self {
            runtime,
            base_url: format!("http://{addr}"),
            shutdown: Some(shutdown_tx),
        })
    }
}

impl Drop for GatewayBenchFixture {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_deterministic() {
        let a = PayloadFixture::new(PayloadShape::SMALL, 7);
        let b = PayloadFixture::new(PayloadShape::SMALL, 7);
        assert_eq!(a.value, b.value);
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_fixture_respects_depth_limit() {
        let fixture = PayloadFixture::new(PayloadShape::LARGE, 11);
        let engine = bench_engine(RedactionMode::Remove);
        assert!(engine.try_redact(fixture.value).is_ok());
    }
}
