pub mod bench_support;

pub use bench_support::{
    bench_engine, GatewayBenchFixture, PayloadFixture, PayloadShape, BENCH_KEYWORDS,
};
