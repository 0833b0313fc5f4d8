// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod common;

use async_trait::async_trait;
use common::{Harness, CAR};
use std::sync::Arc;
use vitrine_core::{
    scene::SceneNodeKind,
    xr::{
        ReferenceSpaceKind, SessionInit, SessionMode, UserActivation, XrError, XrSession,
        XrSystem,
    },
};
use vitrine_infra::{
    HeadlessRenderEngine, LogOverlayHost, SimulatedXrSystem, StaticModelLoader,
};
use vitrine_xr::{SessionError, SessionManager, SessionServices, SessionState, XrConfig};

/// A platform that never answers session requests.
struct UnansweredSystem;

#[async_trait]
impl XrSystem for UnansweredSystem {
    async fn is_session_supported(&self, _mode: SessionMode) -> Result<bool, XrError> {
        Ok(true)
    }

    async fn request_session(
        &self,
        _mode: SessionMode,
        _init: &SessionInit,
        _activation: UserActivation,
    ) -> Result<Arc<dyn XrSession>, XrError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn second_start_is_rejected_while_active() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveAr, Some(CAR)).await;

    let err = h
        .manager
        .start(
            SessionMode::ImmersiveVr,
            None,
            None,
            UserActivation::from_input_event(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::AlreadyActive(SessionState::Active)));
    assert_eq!(h.manager.state(), SessionState::Active);
    assert_eq!(h.manager.mode(), Some(SessionMode::ImmersiveAr));
    assert_eq!(h.system.session_request_count(), 1);
    assert_eq!(h.engine.counters().live(), 1);
}

#[tokio::test]
async fn start_is_rejected_while_ending() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveVr, None).await;
    h.manager.end();

    let err = h
        .manager
        .start(
            SessionMode::ImmersiveVr,
            None,
            None,
            UserActivation::from_input_event(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::AlreadyActive(SessionState::Ending)));
    assert_eq!(h.system.session_request_count(), 1);
}

#[tokio::test]
async fn cleanup_is_idempotent() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.manager.cleanup();
    h.manager.cleanup();
    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();

    h.start(SessionMode::ImmersiveAr, None).await;
    h.manager.cleanup();
    h.manager.cleanup();
    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();
    assert_eq!(h.engine.counters().disposed, 1);
}

#[tokio::test]
async fn start_without_gesture_recovers() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    let err = h
        .manager
        .start(
            SessionMode::ImmersiveAr,
            Some(CAR),
            Some("Toy Car"),
            UserActivation::none(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Grant(XrError::NotAllowed(_))));
    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();
    let counters = h.engine.counters();
    assert_eq!((counters.created, counters.disposed), (1, 1));

    h.start(SessionMode::ImmersiveAr, Some(CAR)).await;
    assert_eq!(h.manager.state(), SessionState::Active);
}

#[tokio::test]
async fn overlay_failure_leaves_nothing_behind() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.overlays.set_fail_mount(true);
    let err = h
        .manager
        .start(
            SessionMode::ImmersiveAr,
            None,
            None,
            UserActivation::from_input_event(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Overlay(_)));
    h.assert_torn_down();
    assert_eq!(h.engine.counters().created, 0);
    assert_eq!(h.system.session_request_count(), 0);
}

#[tokio::test]
async fn renderer_failure_leaves_nothing_behind() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.engine.set_fail_creation(true);
    let err = h
        .manager
        .start(
            SessionMode::ImmersiveVr,
            None,
            None,
            UserActivation::from_input_event(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Engine(_)));
    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();
}

#[tokio::test]
async fn missing_xr_system_is_a_grant_error() {
    common::init_logger();
    let engine = HeadlessRenderEngine::new();
    let overlays = Arc::new(LogOverlayHost::new());
    let services = SessionServices {
        system: None,
        engine: Arc::new(engine.clone()),
        overlay_host: overlays.clone(),
        loader: Arc::new(StaticModelLoader::new()),
    };
    let mut manager = SessionManager::new(services, XrConfig::default());

    let err = manager
        .start(
            SessionMode::ImmersiveAr,
            None,
            None,
            UserActivation::from_input_event(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Grant(XrError::Unavailable)));
    assert!(overlays.mounted().is_empty());
    assert_eq!(engine.counters().live(), 0);
}

#[tokio::test]
async fn end_waits_for_the_platform_notification() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveAr, None).await;
    let session = h.system.last_session().expect("granted session");

    h.manager.end();
    assert_eq!(h.manager.state(), SessionState::Ending);
    assert!(h.manager.scene().is_some());
    assert!(h.manager.overlay().is_some());
    assert!(session.is_ended());

    h.manager.pump_events();
    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();
}

#[tokio::test]
async fn platform_initiated_end_cleans_up() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveVr, Some(CAR)).await;

    h.system
        .last_session()
        .expect("granted session")
        .platform_end();
    h.manager.pump_events();

    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();
}

#[tokio::test]
async fn end_of_a_vanished_session_cleans_up_immediately() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveAr, None).await;
    let session = h.system.last_session().expect("granted session");
    session.platform_end();

    h.manager.end();
    assert_eq!(h.manager.state(), SessionState::Idle);
    h.assert_torn_down();

    h.manager.pump_events();
    assert_eq!(h.manager.state(), SessionState::Idle);
}

#[tokio::test]
async fn failed_end_keeps_the_session_running() {
    let mut h = Harness::new(
        SimulatedXrSystem::new().with_end_error(XrError::Platform("compositor busy".into())),
    );
    h.start(SessionMode::ImmersiveVr, None).await;

    h.manager.end();
    assert_eq!(h.manager.state(), SessionState::Active);
    assert!(h.manager.scene().is_some());
}

#[tokio::test]
async fn floor_space_falls_back_to_local() {
    let mut h = Harness::new(SimulatedXrSystem::new().without_local_floor());
    h.start(SessionMode::ImmersiveAr, None).await;
    assert_eq!(
        h.manager.reference_space().map(|s| s.kind),
        Some(ReferenceSpaceKind::Local)
    );

    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveAr, None).await;
    assert_eq!(
        h.manager.reference_space().map(|s| s.kind),
        Some(ReferenceSpaceKind::LocalFloor)
    );
}

#[tokio::test]
async fn events_of_an_old_session_are_ignored() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveVr, None).await;
    let first = h.system.last_session().expect("first session");
    h.manager.end();
    h.manager.pump_events();

    h.start(SessionMode::ImmersiveVr, None).await;
    assert!(!first.select(), "the old sink must be disconnected");
    h.manager.pump_events();
    assert!(h.manager.placed_objects().is_empty());
    assert_eq!(h.manager.state(), SessionState::Active);
}

#[tokio::test]
async fn scene_is_built_for_the_session() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveAr, Some(CAR)).await;

    let scene = h.manager.scene().expect("scene");
    assert_eq!(scene.count_where(|k| matches!(k, SceneNodeKind::Light(_))), 3);
    assert_eq!(
        scene.count_where(|k| matches!(k, SceneNodeKind::Controller { .. })),
        1
    );
    let reticle = h.manager.reticle().expect("reticle");
    assert!(!reticle.is_visible());

    let overlays = h.overlays.mounted();
    assert_eq!(overlays.len(), 1);
    assert_eq!(
        overlays[0].hint,
        "Look at a surface, then tap to place \"Toy Car\""
    );
    assert_eq!(h.engine.counters().bound, 1);
}

#[tokio::test]
async fn every_session_gets_a_new_generation() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    assert_eq!(h.manager.generation(), 0);
    h.start(SessionMode::ImmersiveVr, None).await;
    assert_eq!(h.manager.generation(), 1);
    h.manager.end();
    h.manager.pump_events();
    h.start(SessionMode::ImmersiveVr, None).await;
    assert_eq!(h.manager.generation(), 2);
    assert_eq!(h.manager.stats().sessions_started, 2);
}

#[tokio::test]
async fn abandoned_start_leaves_nothing_behind() {
    let h = Harness::new(SimulatedXrSystem::new());
    let mut manager = SessionManager::new(
        h.services(Arc::new(UnansweredSystem)),
        XrConfig::default(),
    );

    tokio::select! {
        biased;
        _ = manager.start(
            SessionMode::ImmersiveAr,
            Some(CAR),
            Some("Toy Car"),
            UserActivation::from_input_event(),
        ) => panic!("the platform never answers"),
        _ = tokio::task::yield_now() => {}
    }

    assert_eq!(manager.state(), SessionState::Idle);
    assert!(manager.overlay().is_none());
    assert!(manager.scene().is_none());
    assert!(h.overlays.mounted().is_empty());
    assert_eq!(h.engine.counters().live(), 0);

    let retry = tokio::select! {
        biased;
        result = manager.start(
            SessionMode::ImmersiveAr,
            Some(CAR),
            Some("Toy Car"),
            UserActivation::from_input_event(),
        ) => Some(result),
        _ = tokio::task::yield_now() => None,
    };
    assert!(retry.is_none(), "a new start must reach the platform again");
    assert_eq!(manager.generation(), 2);
    let counters = h.engine.counters();
    assert_eq!((counters.created, counters.disposed), (2, 2));
}

#[tokio::test]
async fn cleanup_ends_the_platform_session() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveAr, Some(CAR)).await;
    let first = h.system.last_session().expect("granted session");

    h.manager.cleanup();
    assert!(first.is_ended());
    h.assert_torn_down();

    h.start(SessionMode::ImmersiveAr, Some(CAR)).await;
    let running = h
        .system
        .sessions()
        .iter()
        .filter(|session| !session.is_ended())
        .count();
    assert_eq!(running, 1);
}

#[tokio::test]
async fn dropping_the_manager_ends_the_platform_session() {
    let mut h = Harness::new(SimulatedXrSystem::new());
    h.start(SessionMode::ImmersiveVr, None).await;
    let session = h.system.last_session().expect("granted session");

    let Harness {
        manager,
        engine,
        overlays,
        ..
    } = h;
    drop(manager);

    assert!(session.is_ended());
    assert!(overlays.mounted().is_empty());
    assert_eq!(engine.counters().live(), 0);
}
