//! Single-antecedent, single-consequent rules.

use rotorsim_core::error::FuzzyError;

use crate::variable::{Antecedent, Consequent};

/// `IF input IS antecedent THEN output IS consequent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    antecedent: String,
    consequent: String,
}

impl Rule {
    pub fn new(antecedent: impl Into<String>, consequent: impl Into<String>) -> Self {
        Self {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        }
    }

    pub fn antecedent(&self) -> &str {
        &self.antecedent
    }

    pub fn consequent(&self) -> &str {
        &self.consequent
    }
}

/// A rule whose labels were resolved against a concrete antecedent and
/// consequent.
#[derive(Clone, Debug)]
pub(crate) struct BoundRule {
    rule: Rule,
    antecedent_term: usize,
    consequent_term: usize,
}

impl BoundRule {
    /// Firing strength: the antecedent degree at this rule's label.
    pub(crate) fn firing_strength(&self, antecedent: &Antecedent, x: f64) -> f64 {
        antecedent.degree_at(self.antecedent_term, x)
    }

    /// Mamdani min-implication: the consequent shape capped at `strength`,
    /// sampled over the output universe.
    pub(crate) fn clipped<'a>(
        &self,
        consequent: &'a Consequent,
        strength: f64,
    ) -> impl Iterator<Item = f64> + 'a {
        let shape = *consequent.variable().term_at(self.consequent_term);
        consequent
            .variable()
            .universe()
            .samples()
            .iter()
            .map(move |&y| strength.min(shape.degree(y)))
    }
}

// ---------------------------------------------------------------------------
// RuleBase
// ---------------------------------------------------------------------------

/// Ordered, non-empty rule set bound to one antecedent and one consequent.
#[derive(Clone, Debug)]
pub struct RuleBase {
    rules: Vec<BoundRule>,
}

impl RuleBase {
    /// Resolve every rule's labels. Fails on an empty list or on a label the
    /// variables do not define.
    pub fn bind(
        rules: Vec<Rule>,
        antecedent: &Antecedent,
        consequent: &Consequent,
    ) -> Result<Self, FuzzyError> {
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase);
        }
        let rules = rules
            .into_iter()
            .map(|rule| {
                let antecedent_term = antecedent.variable().term_index(&rule.antecedent)?;
                let consequent_term = consequent.variable().term_index(&rule.consequent)?;
                Ok(BoundRule {
                    rule,
                    antecedent_term,
                    consequent_term,
                })
            })
            .collect::<Result<Vec<_>, FuzzyError>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false` for a bound rule base.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|bound| &bound.rule)
    }

    pub(crate) fn bound(&self) -> &[BoundRule] {
        &self.rules
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangle;
    use crate::universe::Universe;
    use crate::variable::FuzzyVariable;
    use approx::assert_relative_eq;

    fn antecedent() -> Antecedent {
        Antecedent::new(
            FuzzyVariable::new("error", Universe::arange(0.0, 100.0, 1.0).unwrap())
                .with_term("small", Triangle::new(0.0, 0.0, 30.0).unwrap())
                .unwrap()
                .with_term("medium", Triangle::new(10.0, 40.0, 80.0).unwrap())
                .unwrap(),
        )
    }

    fn consequent() -> Consequent {
        Consequent::new(
            FuzzyVariable::new("gain", Universe::arange(0.0, 3.0, 0.5).unwrap())
                .with_term("small", Triangle::new(0.0, 0.0, 2.0).unwrap())
                .unwrap()
                .with_term("large", Triangle::new(1.0, 3.0, 3.0).unwrap())
                .unwrap(),
        )
    }

    #[test]
    fn empty_rule_base_rejected() {
        let err = RuleBase::bind(Vec::new(), &antecedent(), &consequent()).unwrap_err();
        assert_eq!(err, FuzzyError::EmptyRuleBase);
    }

    #[test]
    fn unknown_antecedent_label_rejected() {
        let err = RuleBase::bind(vec![Rule::new("large", "small")], &antecedent(), &consequent())
            .unwrap_err();
        assert_eq!(
            err,
            FuzzyError::UnknownLabel {
                variable: "error".into(),
                label: "large".into()
            }
        );
    }

    #[test]
    fn unknown_consequent_label_rejected() {
        let err = RuleBase::bind(vec![Rule::new("small", "medium")], &antecedent(), &consequent())
            .unwrap_err();
        assert!(matches!(err, FuzzyError::UnknownLabel { variable, .. } if variable == "gain"));
    }

    #[test]
    fn rules_keep_order() {
        let base = RuleBase::bind(
            vec![Rule::new("small", "large"), Rule::new("medium", "small")],
            &antecedent(),
            &consequent(),
        )
        .unwrap();
        assert_eq!(base.len(), 2);
        let pairs: Vec<_> = base.rules().map(|r| (r.antecedent(), r.consequent())).collect();
        assert_eq!(pairs, [("small", "large"), ("medium", "small")]);
    }

    #[test]
    fn firing_strength_and_clipping() {
        let (ante, cons) = (antecedent(), consequent());
        let base = RuleBase::bind(vec![Rule::new("medium", "small")], &ante, &cons).unwrap();
        let rule = &base.bound()[0];

        let strength = rule.firing_strength(&ante, 50.0);
        assert_relative_eq!(strength, 0.75);

        let clipped: Vec<f64> = rule.clipped(&cons, strength).collect();
        let expected = [0.75, 0.75, 0.5, 0.25, 0.0, 0.0];
        assert_eq!(clipped.len(), expected.len());
        for (got, want) in clipped.iter().zip(expected) {
            assert_relative_eq!(*got, want);
        }
    }
}
