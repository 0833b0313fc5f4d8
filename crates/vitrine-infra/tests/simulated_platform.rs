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

use std::sync::Arc;
use vitrine_core::ui::OverlayHandle;
use vitrine_core::xr::{
    SessionFeature, SessionInit, SessionMode, UserActivation, XrError, XrSystem,
};
use vitrine_infra::{HitTestBehavior, ProbeBehavior, SimulatedXrSystem};

fn gallery_init() -> SessionInit {
    SessionInit {
        required_features: Vec::new(),
        optional_features: vec![
            SessionFeature::DomOverlay,
            SessionFeature::HitTest,
            SessionFeature::LocalFloor,
        ],
        dom_overlay_root: Some(OverlayHandle(1)),
    }
}

#[tokio::test]
async fn session_needs_a_user_gesture() {
    let system = SimulatedXrSystem::new();
    let err = system
        .request_session(SessionMode::ImmersiveAr, &gallery_init(), UserActivation::none())
        .await
        .unwrap_err();
    assert!(matches!(err, XrError::NotAllowed(_)));
    assert!(system.last_session().is_none());
    assert_eq!(system.session_request_count(), 1);
}

#[tokio::test]
async fn vr_sessions_never_get_hit_testing() {
    let system = SimulatedXrSystem::new();
    let session = system
        .request_session(
            SessionMode::ImmersiveVr,
            &gallery_init(),
            UserActivation::from_input_event(),
        )
        .await
        .expect("session granted");
    assert_eq!(
        session.enabled_features(),
        vec![SessionFeature::DomOverlay, SessionFeature::LocalFloor]
    );
}

#[tokio::test]
async fn optional_features_degrade() {
    let system = SimulatedXrSystem::new()
        .with_hit_test(HitTestBehavior::Absent)
        .without_local_floor();
    let session = system
        .request_session(
            SessionMode::ImmersiveAr,
            &gallery_init(),
            UserActivation::from_input_event(),
        )
        .await
        .expect("optional features never block the grant");
    assert_eq!(session.enabled_features(), vec![SessionFeature::DomOverlay]);
}

#[tokio::test]
async fn missing_required_feature_fails_the_grant() {
    let system = SimulatedXrSystem::new().with_hit_test(HitTestBehavior::Absent);
    let init = SessionInit {
        required_features: vec![SessionFeature::HitTest],
        ..SessionInit::default()
    };
    let err = system
        .request_session(SessionMode::ImmersiveAr, &init, UserActivation::from_input_event())
        .await
        .unwrap_err();
    assert!(matches!(err, XrError::NotSupported(_)));
}

#[tokio::test]
async fn unsupported_mode_is_refused() {
    let system: Arc<dyn XrSystem> = Arc::new(
        SimulatedXrSystem::new()
            .with_ar(ProbeBehavior::Unsupported)
            .with_vr(ProbeBehavior::Fails(XrError::Unavailable)),
    );
    assert_eq!(
        system.is_session_supported(SessionMode::ImmersiveAr).await,
        Ok(false)
    );
    assert!(system
        .request_session(
            SessionMode::ImmersiveVr,
            &gallery_init(),
            UserActivation::from_input_event()
        )
        .await
        .is_err());
}
