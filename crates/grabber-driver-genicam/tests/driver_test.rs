#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]
//! Test suite for the driver: open-time bootstrap, acquisition control,
//! resolution handling, and the capability-trait surface.

use grabber_core::{
    CameraFeature, CameraSession, FeatureControl, GrabberError, ParamValue, ResolutionControl,
};
use grabber_driver_genicam::mock::MockSession;
use grabber_driver_genicam::{feature_by_id, GenicamConfig, GenicamDriver};
use std::sync::Arc;

fn config(serial: &str) -> GenicamConfig {
    GenicamConfig {
        serial_number: serial.to_string(),
        ..GenicamConfig::default()
    }
}

fn float_value(session: &MockSession, name: &str) -> f64 {
    match session.parameter_value(name) {
        Some(ParamValue::Float(v)) => v,
        other => panic!("expected a float in '{name}', got {other:?}"),
    }
}

// =============================================================================
// Opening and acquisition control
// =============================================================================

mod opening {
    use super::*;

    #[test]
    fn open_bootstraps_the_device_and_starts_grabbing() {
        let session = Arc::new(MockSession::new());
        let config = GenicamConfig {
            serial_number: "40094772".into(),
            width: 1280,
            height: 720,
            period_s: 0.05,
            ..GenicamConfig::default()
        };

        let driver = GenicamDriver::open(session.clone(), &config).unwrap();

        assert!(session.is_grabbing());
        assert!(driver.is_grabbing());
        assert_eq!(
            session.parameter_value("AcquisitionFrameRateEnable"),
            Some(ParamValue::Bool(true))
        );
        assert_eq!(
            session.parameter_value("BslScalingEnable"),
            Some(ParamValue::Bool(true))
        );
        assert_eq!(
            session.parameter_value("Width"),
            Some(ParamValue::Integer(1280))
        );
        assert_eq!(
            session.parameter_value("Height"),
            Some(ParamValue::Integer(720))
        );
        // Exposure control stays manual after open.
        assert_eq!(
            session.parameter_value("ExposureAuto"),
            Some(ParamValue::Enumeration("Off".into()))
        );
        // period 0.05 s → 20 fps
        assert!((float_value(&session, "AcquisitionFrameRate") - 20.0).abs() < 1e-9);
    }

    #[test]
    fn open_rejects_invalid_config_without_touching_the_session() {
        let session = Arc::new(MockSession::new());

        let err = GenicamDriver::open(session.clone(), &config("")).unwrap_err();

        assert!(matches!(err, GrabberError::Configuration(_)));
        assert!(session.events().is_empty());
        assert!(!session.is_grabbing());
    }

    #[test]
    fn close_stops_grabbing() {
        let session = Arc::new(MockSession::new());
        let driver = GenicamDriver::open(session.clone(), &config("x")).unwrap();
        assert!(session.is_grabbing());

        driver.close().unwrap();
        assert!(!session.is_grabbing());
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let session = Arc::new(MockSession::new());
        let driver = GenicamDriver::open(session.clone(), &config("x")).unwrap();

        driver.start().unwrap();
        driver.start().unwrap();
        assert!(driver.is_grabbing());

        driver.stop().unwrap();
        driver.stop().unwrap();
        assert!(!driver.is_grabbing());
    }
}

// =============================================================================
// Resolution
// =============================================================================

mod resolution {
    use super::*;

    #[test]
    fn set_resolution_updates_device_and_cache() {
        let session = Arc::new(MockSession::new());
        let driver = GenicamDriver::open(session.clone(), &config("x")).unwrap();

        driver.set_resolution(800, 600).unwrap();

        assert_eq!(
            session.parameter_value("Width"),
            Some(ParamValue::Integer(800))
        );
        assert_eq!(
            session.parameter_value("Height"),
            Some(ParamValue::Integer(600))
        );
        assert_eq!(driver.resolution(), (800, 600));
        assert!(session.is_grabbing(), "resolution writes must resume grabbing");
    }

    #[test]
    fn zero_resolution_is_rejected_locally() {
        let session = Arc::new(MockSession::new());
        let driver = GenicamDriver::open(session.clone(), &config("x")).unwrap();
        let before = driver.resolution();
        session.clear_events();

        assert!(driver.set_resolution(0, 600).is_err());

        assert_eq!(driver.resolution(), before);
        assert!(session.events().is_empty());
    }

    #[test]
    fn cache_is_kept_when_the_device_rejects_a_dimension() {
        let session = Arc::new(MockSession::new());
        let driver = GenicamDriver::open(session.clone(), &config("x")).unwrap();
        session.fail_writes_to("Height");

        assert!(driver.set_resolution(800, 600).is_err());
        assert_eq!(driver.resolution(), (640, 480));
        assert!(session.is_grabbing());
    }

    #[test]
    fn rotation_with_crop_swaps_the_requested_geometry() {
        let session = Arc::new(MockSession::new());
        let config = GenicamConfig {
            serial_number: "x".into(),
            width: 1280,
            height: 720,
            rotation: 90.0,
            rotation_with_crop: true,
            ..GenicamConfig::default()
        };

        let driver = GenicamDriver::open(session.clone(), &config).unwrap();

        assert_eq!(driver.resolution(), (720, 1280));
        assert_eq!(
            session.parameter_value("Width"),
            Some(ParamValue::Integer(720))
        );
        assert_eq!(
            session.parameter_value("Height"),
            Some(ParamValue::Integer(1280))
        );
        assert_eq!(driver.rotation(), 90.0);
    }
}

// =============================================================================
// Capability surface
// =============================================================================

mod control_surface {
    use super::*;

    #[test]
    fn feature_control_works_through_the_driver() {
        let session = Arc::new(MockSession::new());
        let driver = GenicamDriver::open(session.clone(), &config("x")).unwrap();

        driver.set_value(CameraFeature::Gain, 0.5).unwrap();
        assert!((float_value(&session, "Gain") - 16.53).abs() < 1e-9);

        let value = driver.value(CameraFeature::Gain).unwrap();
        assert!((value - 0.5).abs() < 1e-9);

        assert!(driver.has_feature(CameraFeature::Exposure));
        assert!(!driver.has_feature(CameraFeature::Trigger));

        driver.set_active(CameraFeature::Exposure, true).unwrap();
        assert!(driver.active(CameraFeature::Exposure).unwrap());
        assert!(session.is_grabbing());
    }

    #[test]
    fn frame_rate_through_the_driver_reflects_the_open_configuration() {
        let session = Arc::new(MockSession::new());
        let config = GenicamConfig {
            serial_number: "x".into(),
            period_s: 0.05,
            ..GenicamConfig::default()
        };
        let driver = GenicamDriver::open(session, &config).unwrap();

        let fps = driver.value(CameraFeature::FrameRate).unwrap();
        assert!((fps - 20.0).abs() < 1e-9);
    }

    #[test]
    fn integer_identifiers_resolve_through_the_gate() {
        assert_eq!(feature_by_id(5).unwrap(), CameraFeature::Gain);
        assert_eq!(feature_by_id(3).unwrap(), CameraFeature::WhiteBalance);

        assert!(matches!(
            feature_by_id(-1),
            Err(GrabberError::UnknownFeature(-1))
        ));
        assert!(matches!(
            feature_by_id(99),
            Err(GrabberError::UnknownFeature(99))
        ));
    }
}
