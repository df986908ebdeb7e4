/**
 * assembler.rs
 * CONSTRUCT query assembly from factory-supplied fragments
 *
 * Fragment correctness is the supplying factory's responsibility; this
 * layer performs no escaping or validation. Its only contract is
 * deterministic, whitespace-stable concatenation:
 *
 *   CONSTRUCT { <bgp> } WHERE { <where> }
 *       [VALUES (?<var>) { (<subject>) }] [GROUP BY <groupBy>]
 */

use std::fmt;

use oxigraph::model::NamedNode;

/// Binding that scopes a query to a single candidate subject
///
/// The variable name comes from the factory, not from this assembler,
/// so every processor keeps its own variable naming. Scoping is the
/// mechanism used to re-run extraction for one newly created object
/// instead of rescanning an entire graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectScope {
    pub variable: String,
    pub subject: NamedNode,
}

impl SubjectScope {
    pub fn new(variable: impl Into<String>, subject: NamedNode) -> Self {
        Self {
            variable: variable.into(),
            subject,
        }
    }
}

/// An assembled SPARQL CONSTRUCT query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructQuery {
    query: String,
}

impl ConstructQuery {
    /// Assemble a CONSTRUCT query from fragments
    ///
    /// The VALUES clause is emitted only when a subject scope is given;
    /// GROUP BY only when `group_by` is non-empty.
    pub fn assemble(
        bgp: &str,
        where_clause: &str,
        subject: Option<&SubjectScope>,
        group_by: Option<&str>,
    ) -> Self {
        let mut query = format!("CONSTRUCT {{ {} }} WHERE {{ {} }}", bgp, where_clause);

        if let Some(scope) = subject {
            query.push_str(&format!(
                " VALUES (?{}) {{ ({}) }}",
                scope.variable, scope.subject
            ));
        }

        if let Some(group_by) = group_by {
            if !group_by.is_empty() {
                query.push_str(&format!(" GROUP BY {}", group_by));
            }
        }

        Self { query }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn into_string(self) -> String {
        self.query
    }
}

impl fmt::Display for ConstructQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
