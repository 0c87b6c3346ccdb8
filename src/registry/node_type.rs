use serde::{Deserialize, Serialize};

use crate::common::Vars;

/// Every node type the editor knows how to render and seed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr, strum::IntoStaticStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    #[default]
    Wait,
    AddPrompt,
    AddBio,
    SwipeWithSpectre,
    ActivateContinuousSwipe,
    Goto,
    /// Visual entry anchor, never persisted as a step.
    Start,
}

impl ActionType {
    /// Whether nodes of this type correspond to a real step.
    pub fn is_step(&self) -> bool {
        !matches!(self, ActionType::Start)
    }
}

/// Display metadata and seed values for one node type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeConfig {
    #[serde(rename = "type")]
    pub node_type: ActionType,
    pub label: &'static str,
    pub description: &'static str,
    /// field values copied into newly added nodes
    pub default_data: Vars,
    /// css color used by the canvas
    pub color: &'static str,
}

impl NodeTypeConfig {
    /// Step action this node type flattens to, `None` for the anchor.
    pub fn action(&self) -> Option<&'static str> {
        self.node_type.is_step().then(|| self.node_type.into())
    }
}

pub(super) fn builtin() -> Vec<NodeTypeConfig> {
    vec![
        NodeTypeConfig {
            node_type: ActionType::Wait,
            label: "Wait",
            description: "Pause before the next step",
            default_data: Vars::new().with("description", "Wait").with("delay", 5000),
            color: "#64748b",
        },
        NodeTypeConfig {
            node_type: ActionType::AddPrompt,
            label: "Add Prompt",
            description: "Fill a profile prompt",
            default_data: Vars::new().with("description", "Add a profile prompt").with("delay", 2000).with("critical", true).with("timeout", 30000),
            color: "#8b5cf6",
        },
        NodeTypeConfig {
            node_type: ActionType::AddBio,
            label: "Add Bio",
            description: "Write the profile bio",
            default_data: Vars::new().with("description", "Add a bio").with("delay", 2000).with("critical", false).with("timeout", 30000),
            color: "#06b6d4",
        },
        NodeTypeConfig {
            node_type: ActionType::SwipeWithSpectre,
            label: "Swipe (Spectre)",
            description: "Run a fixed number of swipes",
            default_data: Vars::new().with("description", "Swipe with Spectre").with("delay", 0).with("swipeCount", 50).with("timeout", 300000),
            color: "#ec4899",
        },
        NodeTypeConfig {
            node_type: ActionType::ActivateContinuousSwipe,
            label: "Continuous Swipe",
            description: "Swipe continuously within a random range",
            default_data: Vars::new()
                .with("description", "Activate continuous swipe")
                .with("delay", 0)
                .with("minSwipes", 10)
                .with("maxSwipes", 30)
                .with("minIntervalMs", 2000)
                .with("maxIntervalMs", 5000),
            color: "#f97316",
        },
        NodeTypeConfig {
            node_type: ActionType::Goto,
            label: "Go To",
            description: "Jump back to an earlier step",
            default_data: Vars::new()
                .with("description", "Loop back")
                .with("delay", 0)
                .with("infiniteAllowed", false)
                .with("maxIterations", 10)
                .with("trackIterations", true),
            color: "#eab308",
        },
        NodeTypeConfig {
            node_type: ActionType::Start,
            label: "Start",
            description: "Workflow entry point",
            default_data: Vars::new(),
            color: "#22c55e",
        },
    ]
}
