use std::fmt;
use std::hash::{Hash, Hasher};

use ahash::RandomState;
use indexmap::IndexMap;

use super::BindError;
use crate::statement::segment::{Identifier, ProjectionSegment};
use crate::util::fold_case;

/// A relation name compared without regard to case. The original spelling is
/// kept for display and for the owner of expanded shorthand columns.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveIdentifier {
    folded: String,
    original: Identifier,
}

impl CaseInsensitiveIdentifier {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            folded: fold_case(&identifier.value),
            original: identifier,
        }
    }

    pub fn original(&self) -> &Identifier {
        &self.original
    }
}

impl PartialEq for CaseInsensitiveIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for CaseInsensitiveIdentifier {}

impl Hash for CaseInsensitiveIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl From<&Identifier> for CaseInsensitiveIdentifier {
    fn from(identifier: &Identifier) -> Self {
        Self::new(identifier.clone())
    }
}

impl From<&str> for CaseInsensitiveIdentifier {
    fn from(name: &str) -> Self {
        Self::new(Identifier::new(name))
    }
}

impl fmt::Display for CaseInsensitiveIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.original.value)
    }
}

/// relation name -> shape, in the order the relations became visible
pub type TableBinderContexts =
    IndexMap<CaseInsensitiveIdentifier, TableSegmentBinderContext, RandomState>;

/// The resolved output shape of one named relation: a table, a derived table or a CTE.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSegmentBinderContext {
    projections: Vec<ProjectionSegment>,
}

impl TableSegmentBinderContext {
    /// Shorthand projections are replaced by the columns they expand to, so that
    /// positions stay meaningful for `*` expansion of this shape.
    pub fn new(projections: impl IntoIterator<Item = ProjectionSegment>) -> Self {
        let mut flattened = vec![];
        for projection in projections {
            Self::flatten_into(projection, &mut flattened);
        }
        Self {
            projections: flattened,
        }
    }

    fn flatten_into(projection: ProjectionSegment, result: &mut Vec<ProjectionSegment>) {
        match projection {
            ProjectionSegment::Shorthand(shorthand) => {
                for actual in shorthand.actual_projections {
                    Self::flatten_into(actual, result);
                }
            }
            other => result.push(other),
        }
    }

    /// Rename the columns positionally, as `name(c1, c2, ...)` does. An empty
    /// alias list keeps the shape unchanged.
    pub fn with_column_aliases(
        self,
        relation_name: &Identifier,
        aliases: &[Identifier],
    ) -> Result<Self, BindError> {
        if aliases.is_empty() {
            return Ok(self);
        }
        if aliases.len() != self.projections.len() {
            return Err(BindError::ColumnAliasCountMismatch {
                name: relation_name.value.clone(),
                expected: aliases.len(),
                actual: self.projections.len(),
            });
        }
        let projections = self
            .projections
            .iter()
            .zip(aliases.iter())
            .map(|(projection, alias)| projection.with_alias(alias.clone()))
            .collect();
        Ok(Self { projections })
    }

    pub fn projections(&self) -> &[ProjectionSegment] {
        &self.projections
    }

    /// All projections labelled `column_name`, compared without regard to case.
    pub fn find_projections<'a>(
        &'a self,
        column_name: &'a str,
    ) -> impl Iterator<Item = &'a ProjectionSegment> + 'a {
        let folded = fold_case(column_name);
        self.projections.iter().filter(move |projection| {
            projection
                .column_label()
                .map_or(false, |label| fold_case(&label.value) == folded)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::segment::{ColumnSegment, ShorthandProjectionSegment};

    fn column(name: &str) -> ProjectionSegment {
        ProjectionSegment::column(ColumnSegment::new(Identifier::new(name)))
    }

    #[test]
    fn test_identifier_ignores_case() {
        let mut contexts = TableBinderContexts::default();
        contexts.insert(
            CaseInsensitiveIdentifier::from("T_Order"),
            TableSegmentBinderContext::new(vec![column("id")]),
        );
        assert!(contexts.contains_key(&CaseInsensitiveIdentifier::from("t_order")));
        let (key, _) = contexts.get_index(0).unwrap();
        assert_eq!(key.to_string(), "T_Order");
    }

    #[test]
    fn test_relations_and_columns_fold_case_alike() {
        let mut contexts = TableBinderContexts::default();
        contexts.insert(
            CaseInsensitiveIdentifier::from("ÜBERSICHT"),
            TableSegmentBinderContext::new(vec![column("Ärger")]),
        );
        let shape = contexts
            .get(&CaseInsensitiveIdentifier::from("übersicht"))
            .unwrap();
        assert_eq!(shape.find_projections("ÄRGER").count(), 1);
        assert_eq!(shape.find_projections("ärger").count(), 1);
    }

    #[test]
    fn test_shorthand_is_flattened() {
        let shorthand = ProjectionSegment::Shorthand(ShorthandProjectionSegment {
            owner: None,
            actual_projections: vec![column("a"), column("b")],
        });
        let context = TableSegmentBinderContext::new(vec![column("x"), shorthand]);
        let labels = context
            .projections()
            .iter()
            .map(|p| p.column_label().unwrap().value)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["x", "a", "b"]);
    }

    #[test]
    fn test_column_aliases() {
        let context = TableSegmentBinderContext::new(vec![column("a"), column("b")]);
        let renamed = context
            .clone()
            .with_column_aliases(
                &Identifier::new("cte"),
                &[Identifier::new("x"), Identifier::new("y")],
            )
            .unwrap();
        assert_eq!(renamed.find_projections("Y").count(), 1);
        assert_eq!(renamed.find_projections("a").count(), 0);

        assert_eq!(
            context.with_column_aliases(&Identifier::new("cte"), &[Identifier::new("x")]),
            Err(BindError::ColumnAliasCountMismatch {
                name: "cte".to_string(),
                expected: 1,
                actual: 2,
            })
        );
    }
}
