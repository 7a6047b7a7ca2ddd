/// Post-process effect layers attached to cameras.

use super::NodeKey;

/// One stage node: renders `node` into the target named `output`
#[derive(Debug, Clone, PartialEq)]
pub struct EffectNode {
    pub output: String,
    pub node: NodeKey,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageEffect {
    pub name: String,
    pub nodes: Vec<EffectNode>,
}

/// Ordered post-process stack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageEffectLayer {
    pub effects: Vec<ImageEffect>,
}

impl ImageEffectLayer {
    /// Target the camera's content is redirected to
    pub fn first_target(&self) -> Option<&str> {
        self.effects
            .iter()
            .flat_map(|e| e.nodes.iter())
            .next()
            .map(|n| n.output.as_str())
    }

    /// Effect nodes in stack order
    pub fn nodes(&self) -> impl Iterator<Item = &EffectNode> {
        self.effects.iter().flat_map(|e| e.nodes.iter())
    }
}
