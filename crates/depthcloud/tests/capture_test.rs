//! End-to-end tests driving a capture host the way a render loop would.

use depthcloud::*;
use proptest::prelude::*;

const MM: f32 = 0.001;

fn depth_frame(width: usize, height: usize, raw: u16) -> DepthFrame {
    DepthFrame::from_raw_values(width, height, &vec![raw; width * height], MM).unwrap()
}

fn start(host: &mut CaptureHost, capability: DepthCapability) {
    host.handle_event(SessionEvent::Started { capability })
        .expect("session start failed");
}

#[test]
fn test_capture_lifecycle() {
    init_logging();

    let options = Options {
        max_points: 1_000,
        step: 10,
        ..Options::default()
    };
    let mut host = CaptureHost::new(options).unwrap();
    start(&mut host, DepthCapability::Supported);

    let projection = Mat4::perspective_rh_gl(70f32.to_radians(), 0.75, 0.01, 20.0);
    let mut total = 0;

    // Camera walks along +X; every sample sits at 1.5 m
    for i in 0..5 {
        let transform = Mat4::from_translation(Vec3::new(i as f32 * 0.1, 0.0, 0.0));
        let pose = CameraPose::new(projection, transform);
        let report = host
            .on_frame(&XrFrame::with_depth(pose, depth_frame(40, 30, 1500)))
            .unwrap();
        assert_eq!(report.produced, 4 * 3);
        assert_eq!(report.outcome, Some(AppendOutcome::Appended(12)));
        total += report.produced;
    }

    // Frames without depth or without tracking add nothing
    let pose = CameraPose::new(projection, Mat4::IDENTITY);
    assert!(host
        .on_frame(&XrFrame::without_depth(pose))
        .unwrap()
        .outcome
        .is_none());
    assert!(host
        .on_frame(&XrFrame::new(None, DepthQuery::Unavailable))
        .unwrap()
        .outcome
        .is_none());

    assert_eq!(host.point_count(), total);
    assert_eq!(host.flat_positions().len(), total * 3);

    let session = host.session().unwrap();
    for p in session.points() {
        assert!((p.z + 1.5).abs() < 1e-4);
    }
    let stats = session.stats();
    assert_eq!(stats.frames, 7);
    assert_eq!(stats.frames_without_pose, 1);
    assert_eq!(stats.batches_appended, 5);

    let json = host.export_json().unwrap();
    assert_eq!(json, host.export_json().unwrap());
    let parsed = PointCloudSnapshot::from_json(&json).unwrap();
    assert_eq!(parsed.count, total);
    assert_eq!(parsed.points.as_slice(), host.flat_positions());

    host.handle_event(SessionEvent::Ended).unwrap();
    assert_eq!(host.point_count(), 0);
    assert_eq!(host.snapshot().count, 0);
}

#[test]
fn test_buffer_saturation_across_frames() {
    let options = Options {
        max_points: 10,
        step: 8,
        ..Options::default()
    };
    let mut host = CaptureHost::new(options).unwrap();
    start(&mut host, DepthCapability::Supported);

    let pose = CameraPose::default();
    // 16x16 at step 8 gives 4 candidates per frame
    let frame = XrFrame::with_depth(pose, depth_frame(16, 16, 800));
    host.on_frame(&frame);
    host.on_frame(&frame);
    let before = host.flat_positions().to_vec();

    let report = host.on_frame(&frame).unwrap();
    assert!(matches!(report.outcome, Some(AppendOutcome::Full { .. })));
    assert_eq!(host.point_count(), 8);
    assert_eq!(host.flat_positions(), before.as_slice());

    // A batch of 2 still fits
    let narrow = XrFrame::with_depth(pose, depth_frame(16, 8, 800));
    let report = host.on_frame(&narrow).unwrap();
    assert_eq!(report.outcome, Some(AppendOutcome::Appended(2)));
    assert_eq!(host.point_count(), 10);
}

#[test]
fn test_fallback_source_without_depth_sensing() {
    let options = Options {
        fallback: FallbackMode::Random {
            points_per_frame: 50,
        },
        ..Options::compact()
    };
    let mut host = CaptureHost::new(options).unwrap();
    start(&mut host, DepthCapability::Unsupported);
    assert_eq!(host.session().unwrap().source_name(), Some("random"));

    for _ in 0..3 {
        host.on_frame(&XrFrame::without_depth(CameraPose::default()));
    }
    assert!(host.point_count() <= 150);
    for p in host.session().unwrap().points() {
        assert!(-p.z > 0.1 && -p.z < 3.0);
    }
}

#[test]
fn test_failed_depth_query_is_contained() {
    let mut host = CaptureHost::new(Options::default()).unwrap();
    start(&mut host, DepthCapability::Supported);

    let report = host
        .on_frame(&XrFrame::new(
            Some(CameraPose::default()),
            DepthQuery::Failed("depth buffer not ready".to_string()),
        ))
        .unwrap();
    assert_eq!(report.produced, 0);

    // the next frame is processed normally
    let report = host
        .on_frame(&XrFrame::with_depth(
            CameraPose::default(),
            depth_frame(8, 8, 1000),
        ))
        .unwrap();
    assert_eq!(report.outcome, Some(AppendOutcome::Appended(1)));
}

proptest! {
    #[test]
    fn prop_restart_behaves_like_fresh_session(frames_before in 0usize..6, raw in 200u16..4000) {
        let options = Options { max_points: 64, step: 4, ..Options::default() };
        let frame = XrFrame::with_depth(CameraPose::default(), depth_frame(8, 8, raw));

        let mut reused = CaptureHost::new(options.clone()).unwrap();
        start(&mut reused, DepthCapability::Supported);
        for _ in 0..frames_before {
            reused.on_frame(&frame);
        }
        reused.handle_event(SessionEvent::Ended).unwrap();
        start(&mut reused, DepthCapability::Supported);

        let mut fresh = CaptureHost::new(options).unwrap();
        start(&mut fresh, DepthCapability::Supported);

        prop_assert_eq!(reused.on_frame(&frame), fresh.on_frame(&frame));
        prop_assert_eq!(reused.export_json().unwrap(), fresh.export_json().unwrap());
    }
}
