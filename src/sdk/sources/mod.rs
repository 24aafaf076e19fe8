//! Release source implementations for fetching the Flutter release feed

pub mod flutter_infra;

pub use flutter_infra::FlutterInfraSource;
