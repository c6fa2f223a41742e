//! Scenes and the request-driven transition table.

use crate::error::{ErrorSeverity, GameError};
use crate::ids::{HeroId, SkillId};
use crate::level::LevelDataError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Scene {
    #[default]
    Start,
    HeroSelect,
    LevelIntro,
    /// The only scene with a live combat loop.
    Playing,
    /// Combat loop retained but not ticked.
    Paused,
    SkillSelect,
    Shop,
    Victory,
    GameOver,
    /// A level failed validation. Only `Restart` leaves it.
    Error,
}

impl Scene {
    pub fn is_terminal(self) -> bool {
        matches!(self, Scene::Victory | Scene::GameOver | Scene::Error)
    }
}

/// A user-driven request to change scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SceneRequest {
    Confirm,
    ChooseHero(HeroId),
    DismissIntro,
    Pause,
    Resume,
    ChooseSkill(SkillId),
    SkipSkill,
    LeaveShop,
    Restart,
}

/// Rejected scene change. The session is left exactly as it was, except for
/// `LevelLoad`, which moves it to [`Scene::Error`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {request} from {from}")]
    InvalidTransition { from: Scene, request: SceneRequest },

    #[error("unknown {0}")]
    UnknownHero(HeroId),

    #[error("{0} was not offered")]
    SkillNotOffered(SkillId),

    #[error("level failed to load: {0}")]
    LevelLoad(#[from] LevelDataError),
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TransitionError::LevelLoad(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TransitionError::InvalidTransition { .. } => "SCENE_INVALID_TRANSITION",
            TransitionError::UnknownHero(_) => "SCENE_UNKNOWN_HERO",
            TransitionError::SkillNotOffered(_) => "SCENE_SKILL_NOT_OFFERED",
            TransitionError::LevelLoad(_) => "SCENE_LEVEL_LOAD",
        }
    }
}

/// Whether `request` is legal in `scene`. Payload checks (hero exists, skill
/// was offered) happen in the session.
pub fn accepts(scene: Scene, request: SceneRequest) -> bool {
    use SceneRequest::*;
    matches!(
        (scene, request),
        (Scene::Start, Confirm)
            | (Scene::HeroSelect, ChooseHero(_))
            | (Scene::LevelIntro, DismissIntro)
            | (Scene::Playing, Pause)
            | (Scene::Paused, Resume)
            | (Scene::SkillSelect, ChooseSkill(_) | SkipSkill)
            | (Scene::Shop, LeaveShop)
            | (Scene::Victory | Scene::GameOver | Scene::Error, Restart)
    )
}
