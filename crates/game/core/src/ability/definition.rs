use crate::ids::AbilityId;
use crate::stats::StatusSpec;

/// How an ability picks its targets. The resolver is generic over the rule.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingRule {
    /// Only the caster (buffs).
    SelfOnly,
    /// The closest hostile within `range`.
    SingleNearest { range: f32 },
    /// Every hostile within `radius` of the caster.
    AllInRadius { radius: f32 },
    /// Every hostile within `range` and `half_angle_degrees` of the aim direction.
    Cone { range: f32, half_angle_degrees: f32 },
}

impl TargetingRule {
    /// Distance at which this rule can reach a target (0 for self-only).
    pub fn reach(&self) -> f32 {
        match *self {
            TargetingRule::SelfOnly => 0.0,
            TargetingRule::SingleNearest { range } => range,
            TargetingRule::AllInRadius { radius } => radius,
            TargetingRule::Cone { range, .. } => range,
        }
    }

    pub fn is_self_only(&self) -> bool {
        matches!(self, TargetingRule::SelfOnly)
    }
}

/// What happens to each selected target.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectSpec {
    /// Damage before attack/defense modifiers and config scaling.
    pub base_damage: u32,
    /// Status applied to every target.
    pub status: Option<StatusSpec>,
}

impl EffectSpec {
    pub fn damage(base_damage: u32) -> Self {
        Self {
            base_damage,
            status: None,
        }
    }

    pub fn with_status(mut self, status: StatusSpec) -> Self {
        self.status = Some(status);
        self
    }
}

/// Immutable ability/attack template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    /// Seconds before the ability can be cast again.
    pub cooldown: f32,
    /// Energy deducted once per successful cast.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    pub effect: EffectSpec,
    pub targeting: TargetingRule,
    /// Ultimate abilities need a full ultimate charge and consume all of it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultimate: bool,
}

impl AbilityDefinition {
    pub fn new(
        id: AbilityId,
        name: impl Into<String>,
        cooldown: f32,
        effect: EffectSpec,
        targeting: TargetingRule,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cooldown,
            cost: 0,
            effect,
            targeting,
            ultimate: false,
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn as_ultimate(mut self) -> Self {
        self.ultimate = true;
        self
    }
}
