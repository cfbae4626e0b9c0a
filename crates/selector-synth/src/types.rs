//! Core types for the synthesis chain.

use serde::{Deserialize, Serialize};

/// Synthesis strategy enumeration, in priority order.
///
/// This is a priority list, not a scored choice: the first strategy that
/// produces a selector wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthStrategy {
    /// Identifying attribute (`#id` or `[attr="value"]`)
    IdentityAttr,

    /// Compound class selector, accepted only when unique document-wide
    UniqueClass,

    /// `tag:nth-child(n)` position under the parent
    NthChild,

    /// Bare lowercase tag name, for elements with no parent
    BareTag,
}

impl SynthStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            SynthStrategy::IdentityAttr => "identity-attr",
            SynthStrategy::UniqueClass => "unique-class",
            SynthStrategy::NthChild => "nth-child",
            SynthStrategy::BareTag => "bare-tag",
        }
    }

    /// All strategies in evaluation order.
    pub fn priority_chain() -> Vec<SynthStrategy> {
        vec![
            SynthStrategy::IdentityAttr,
            SynthStrategy::UniqueClass,
            SynthStrategy::NthChild,
            SynthStrategy::BareTag,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_chain_order() {
        let chain = SynthStrategy::priority_chain();
        assert_eq!(chain.len(), 4);
        assert_eq!(chain[0], SynthStrategy::IdentityAttr);
        assert_eq!(chain[1], SynthStrategy::UniqueClass);
        assert_eq!(chain[2], SynthStrategy::NthChild);
        assert_eq!(chain[3], SynthStrategy::BareTag);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(SynthStrategy::IdentityAttr.name(), "identity-attr");
        assert_eq!(SynthStrategy::UniqueClass.name(), "unique-class");
    }
}
