//! Tests for response normalization and the generic handler.

use super::*;
use crate::process::{ProcessExited, ProcessStarted};
use crate::test_support::{descriptions, fake_process, log, target_for};

// ---------------------------------------------------------------------------
// OnEvent normalization
// ---------------------------------------------------------------------------

#[test]
fn test_single_entity_ignores_event() {
    let (response, snapshot) = OnEvent::from(log("a")).normalize();
    let action = fake_process("talker");
    let ctx = LaunchContext::new();

    let exited = ProcessExited::new(target_for(&action), 0);
    let started = ProcessStarted::new(target_for(&action));
    for event in [&exited as &dyn Event, &started] {
        let out = response(event, &ctx).unwrap().unwrap();
        assert_eq!(descriptions(&out), ["LogInfo(msg='a')"]);
    }
    assert_eq!(descriptions(&snapshot), ["LogInfo(msg='a')"]);
}

#[test]
fn test_sequence_preserves_order() {
    let (response, snapshot) = OnEvent::from(vec![log("a"), log("b")]).normalize();
    let action = fake_process("talker");
    let event = ProcessExited::new(target_for(&action), 1);

    let out = response(&event, &LaunchContext::new()).unwrap().unwrap();
    assert_eq!(descriptions(&out), ["LogInfo(msg='a')", "LogInfo(msg='b')"]);
    assert_eq!(descriptions(&snapshot), descriptions(&out));
}

#[test]
fn test_sequence_returns_same_instances() {
    let a = log("a");
    let (response, _) = OnEvent::from(vec![a.clone()]).normalize();
    let action = fake_process("talker");
    let event = ProcessExited::new(target_for(&action), 1);

    let out = response(&event, &LaunchContext::new()).unwrap().unwrap();
    assert!(Arc::ptr_eq(&out[0], &a));
}

#[test]
fn test_one_shot_iterator_is_snapshotted() {
    let iter = vec![log("a"), log("b")].into_iter().filter(|_| true);
    let (response, snapshot) = OnEvent::entities(iter).normalize();
    let action = fake_process("talker");
    let event = ProcessExited::new(target_for(&action), 0);
    let ctx = LaunchContext::new();

    let first = response(&event, &ctx).unwrap().unwrap();
    let second = response(&event, &ctx).unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(descriptions(&first), descriptions(&second));
    assert_eq!(snapshot.len(), 2);
}

#[test]
fn test_callback_result_returned_unmodified() {
    let (response, snapshot) = OnEvent::callback(|event, _ctx| {
        if event.is::<ProcessExited>() {
            Ok(Some(vec![log("exited")]))
        } else {
            Ok(None)
        }
    })
    .normalize();
    let action = fake_process("talker");
    let ctx = LaunchContext::new();

    let exited = ProcessExited::new(target_for(&action), 0);
    let started = ProcessStarted::new(target_for(&action));
    assert_eq!(
        descriptions(&response(&exited, &ctx).unwrap().unwrap()),
        ["LogInfo(msg='exited')"]
    );
    assert!(response(&started, &ctx).unwrap().is_none());
    assert!(snapshot.is_empty());
}

#[test]
fn test_callback_sees_context() {
    let (response, _) = OnEvent::callback(|_event, ctx| {
        let msg = if ctx.env_var("VERBOSE").is_some() {
            "verbose"
        } else {
            "quiet"
        };
        Ok(Some(vec![log(msg)]))
    })
    .normalize();
    let action = fake_process("talker");
    let event = ProcessExited::new(target_for(&action), 0);
    let ctx = LaunchContext::new().with_env("VERBOSE", "1");

    let out = response(&event, &ctx).unwrap().unwrap();
    assert_eq!(descriptions(&out), ["LogInfo(msg='verbose')"]);
}

#[test]
fn test_callback_error_propagates() {
    let (response, _) = OnEvent::callback(|_event, _ctx| anyhow::bail!("boom")).normalize();
    let action = fake_process("talker");
    let event = ProcessExited::new(target_for(&action), 0);

    let err = response(&event, &LaunchContext::new()).unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_typed_callback_downcasts() {
    let (response, _) = OnEvent::typed_callback(|exited: &ProcessExited, _ctx| {
        Ok((exited.returncode() != 0).then(|| vec![log("failed")]))
    })
    .normalize();
    let action = fake_process("talker");
    let ctx = LaunchContext::new();

    let ok = ProcessExited::new(target_for(&action), 0);
    let failed = ProcessExited::new(target_for(&action), 3);
    assert!(response(&ok, &ctx).unwrap().is_none());
    assert_eq!(response(&failed, &ctx).unwrap().unwrap().len(), 1);

    let started = ProcessStarted::new(target_for(&action));
    let err = response(&started, &ctx).unwrap_err();
    assert!(err.to_string().contains("ProcessStarted"));
}

#[test]
fn test_on_event_debug() {
    assert_eq!(
        format!("{:?}", OnEvent::callback(|_, _| Ok(None))),
        "Callback(..)"
    );
    assert!(format!("{:?}", OnEvent::from(log("a"))).starts_with("SingleEntity("));
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

#[test]
fn test_handler_for_kind() {
    let handler = Handler::for_kind(ProcessStarted::KIND, OnEvent::from(log("up")));
    let action = fake_process("talker");

    assert!(handler.matches(&ProcessStarted::new(target_for(&action))));
    assert!(!handler.matches(&ProcessExited::new(target_for(&action), 0)));
    assert_eq!(
        handler.matcher_description(),
        "event.kind == 'launch.events.process.ProcessStarted'"
    );
}

#[test]
fn test_handler_describe_actions() {
    let handler = Handler::new(|_| true, "true", OnEvent::from(vec![log("a"), log("b")]));
    let (text, entities) = handler.describe();
    assert_eq!(text, "EventHandler(matcher='true', handler=<actions>)");
    assert_eq!(entities.len(), 2);
}

#[test]
fn test_handler_describe_callable() {
    let handler = Handler::new(|_| true, "true", OnEvent::callback(|_, _| Ok(None)));
    let (text, entities) = handler.describe();
    assert_eq!(text, "EventHandler(matcher='true', handler=<callable>)");
    assert!(entities.is_empty());
}

#[test]
fn test_handler_handle_runs_response() {
    let handler = Handler::new(|_| true, "true", OnEvent::from(log("a")));
    let action = fake_process("talker");
    let event = ProcessExited::new(target_for(&action), 0);

    let out = handler.handle(&event, &LaunchContext::new()).unwrap().unwrap();
    assert_eq!(descriptions(&out), ["LogInfo(msg='a')"]);
}

// ---------------------------------------------------------------------------
// Target helpers
// ---------------------------------------------------------------------------

#[test]
fn test_target_matches_identity() {
    let a = fake_process("talker");
    let b = fake_process("talker");
    assert!(target_matches(None, &a));
    assert!(target_matches(Some(&a), &a.clone()));
    assert!(!target_matches(Some(&a), &b));
}

#[test]
fn test_resolve_target_rejects_non_process() {
    let err = resolve_target("OnProcessExit", Some(log("x"))).unwrap_err();
    assert!(matches!(err, LaunchError::InvalidTargetAction { handler: "OnProcessExit", .. }));
    assert!(err.to_string().contains("LogInfo(msg='x')"));
}

#[test]
fn test_resolve_target_none_and_process() {
    assert!(resolve_target("OnProcessExit", None).unwrap().is_none());

    let action = fake_process("talker");
    let resolved = resolve_target("OnProcessExit", Some(action.as_entity()))
        .unwrap()
        .unwrap();
    assert!(resolved.same_action(&action));
}
