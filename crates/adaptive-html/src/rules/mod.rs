//! Rule system for HTML to Adaptive Card conversion.

mod card;
mod rule;

pub use card::{card_rules, default_rule};
pub use rule::{Filter, PredicateFn, Replacement, ReplacementFn, Rule};

use indexmap::IndexMap;
use log::trace;

use crate::node::NodeRef;
use crate::options::AdaptiveHtmlOptions;

/// Collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in card rules
    card_rules: Vec<Rule>,
    /// Remove rules (drop the node and its content)
    remove_rules: Vec<Filter>,
    /// Applied to nodes matched by a remove filter
    remove_rule: Rule,
    /// Applied when nothing else matches
    default_rule: Rule,
}

impl Rules {
    /// Create a new Rules instance with the card rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            card_rules: card_rules(),
            remove_rules: Vec::new(),
            remove_rule: Rule::new(Filter::any(), |_, _, _| Replacement::empty()),
            default_rule: default_rule(),
        }
    }

    /// Add a custom rule. Re-adding a key replaces the rule but keeps its
    /// original position.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// Find the rule for a node. Custom rules win over card rules, card rules
    /// over remove filters; anything left falls through to the default rule.
    pub fn for_node<'a>(&'a self, node: &NodeRef, options: &AdaptiveHtmlOptions) -> &'a Rule {
        let tag = node.tag_name();

        let matched = self
            .custom_rules
            .values()
            .chain(self.card_rules.iter())
            .find(|rule| rule.filter.matches(&tag, node, options));
        if let Some(rule) = matched {
            return rule;
        }

        if self
            .remove_rules
            .iter()
            .any(|filter| filter.matches(&tag, node, options))
        {
            trace!("Removing <{}>", tag);
            return &self.remove_rule;
        }

        &self.default_rule
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
