//! Walk the control surface against the in-memory mock session.
//!
//! ```bash
//! cargo run -p grabber-driver-genicam --example feature_tour
//! ```

use grabber_core::{CameraFeature, FeatureControl, ResolutionControl, ALL_FEATURES};
use grabber_driver_genicam::mock::MockSession;
use grabber_driver_genicam::{GenicamConfig, GenicamDriver};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let session = Arc::new(MockSession::new());
    let config = GenicamConfig {
        serial_number: "40094772".into(),
        width: 1280,
        height: 720,
        period_s: 0.05,
        ..GenicamConfig::default()
    };
    let driver = GenicamDriver::open(session, &config)?;

    println!("resolution: {:?}", driver.resolution());
    println!("capabilities:");
    for feature in ALL_FEATURES {
        println!(
            "  {:<14} supported={:<5} auto={}",
            feature.to_string(),
            driver.has_feature(feature),
            driver.has_auto(feature)
        );
    }

    driver.set_value(CameraFeature::Gain, 0.5)?;
    println!("gain set to 0.5, read back {}", driver.value(CameraFeature::Gain)?);

    driver.set_value_pair(CameraFeature::WhiteBalance, 0.25, 0.75)?;
    let (blue, red) = driver.value_pair(CameraFeature::WhiteBalance)?;
    println!("white balance blue={blue} red={red}");

    driver.set_active(CameraFeature::Exposure, true)?;
    println!(
        "exposure auto engaged: {}",
        driver.active(CameraFeature::Exposure)?
    );

    driver.one_push(CameraFeature::Gain)?;
    println!("gain one-push done, frame rate {}", driver.value(CameraFeature::FrameRate)?);

    driver.close()?;
    Ok(())
}
