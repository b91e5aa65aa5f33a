//! Parsed SQL templates
//!
//! A ranged template carries three alternative filter clauses, each starting
//! at a `WHERE` and running to the next `WHERE` or the first `ORDER`:
//!
//! ```sql
//! SELECT ... FROM visits
//! WHERE modified BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime'
//! WHERE modified > ':metaModifiedFromDateTime'
//! WHERE modified < ':metaModifiedToDateTime'
//! ORDER BY modified OFFSET ':offset' ROWS FETCH NEXT ':pageSize' ROWS ONLY
//! ```
//!
//! Parsing splits the text into tagged segments once; rendering keeps the
//! segment matching the requested [`RangeFilter`] and substitutes tokens.

use super::range::RangeFilter;
use crate::core::pagination::PageRequest;
use crate::domain::{AdeError, Result};

pub const FROM_TOKEN: &str = ":metaModifiedFromDateTime";
pub const TO_TOKEN: &str = ":metaModifiedToDateTime";
/// Pagination tokens include their quotes; the number replaces both
pub const PAGE_SIZE_TOKEN: &str = "':pageSize'";
pub const OFFSET_TOKEN: &str = "':offset'";

const WHERE: &str = "WHERE";
const ORDER: &str = "ORDER";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Range clause with both bounds
    Between,
    /// Range clause with the lower bound only
    From,
    /// Range clause with the upper bound only
    To,
    /// Anything else; always rendered
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    kind: SegmentKind,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    segments: Vec<Segment>,
    ranged: bool,
}

impl QueryTemplate {
    /// Splits a template into tagged segments
    ///
    /// A template with no range clause at all is accepted as unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `AdeError::TemplateMalformed` if there is no `ORDER` clause, if
    /// only some of the three range clauses exist or one is repeated, or if a
    /// range clause lacks its bound token.
    pub fn parse(sql: &str) -> Result<Self> {
        let order = sql.find(ORDER).ok_or_else(|| {
            AdeError::TemplateMalformed("no ORDER clause to delimit the range clauses".to_string())
        })?;

        let wheres: Vec<usize> = sql[..order].match_indices(WHERE).map(|(i, _)| i).collect();

        let mut segments = Vec::with_capacity(wheres.len() + 2);
        let head_end = wheres.first().copied().unwrap_or(order);
        push_other(&mut segments, &sql[..head_end]);

        for (n, &start) in wheres.iter().enumerate() {
            let end = wheres.get(n + 1).copied().unwrap_or(order);
            let text = &sql[start..end];
            segments.push(Segment {
                kind: classify(text),
                text: text.to_string(),
            });
        }
        push_other(&mut segments, &sql[order..]);

        let count = |kind: SegmentKind| segments.iter().filter(|s| s.kind == kind).count();
        let counts = [
            count(SegmentKind::Between),
            count(SegmentKind::From),
            count(SegmentKind::To),
        ];

        let ranged = match counts {
            [0, 0, 0] => false,
            [1, 1, 1] => true,
            [between, from, to] => {
                return Err(AdeError::TemplateMalformed(format!(
                    "expected one BETWEEN, one '>' and one '<' clause, found {between}, {from} and {to}"
                )))
            }
        };

        for segment in &segments {
            let required: &[&str] = match segment.kind {
                SegmentKind::Between => &[FROM_TOKEN, TO_TOKEN],
                SegmentKind::From => &[FROM_TOKEN],
                SegmentKind::To => &[TO_TOKEN],
                SegmentKind::Other => &[],
            };
            if let Some(token) = required.iter().find(|t| !segment.text.contains(**t)) {
                return Err(AdeError::TemplateMalformed(format!(
                    "range clause '{}' does not contain {token}",
                    segment.text.trim()
                )));
            }
        }

        Ok(Self { segments, ranged })
    }

    /// Whether the template carries the three range clauses
    pub fn is_ranged(&self) -> bool {
        self.ranged
    }

    /// Kinds of the parsed segments, in template order
    pub fn segment_kinds(&self) -> Vec<SegmentKind> {
        self.segments.iter().map(|s| s.kind).collect()
    }

    /// Produces the SQL for one request
    ///
    /// An unfiltered template ignores the range: operations without range
    /// clauses (`get-animals`) always return the full, paged set.
    pub fn render(&self, range: &RangeFilter, page: &PageRequest) -> Result<String> {
        let unbounded = RangeFilter::Unbounded;
        let range = if !self.ranged && !range.is_unbounded() {
            tracing::debug!(?range, "Template has no range clauses; ignoring modification range");
            &unbounded
        } else {
            range
        };

        let keep = match range {
            RangeFilter::Unbounded => None,
            RangeFilter::From(_) => Some(SegmentKind::From),
            RangeFilter::To(_) => Some(SegmentKind::To),
            RangeFilter::Between { .. } => Some(SegmentKind::Between),
        };

        let mut sql = String::new();
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Other => sql.push_str(&segment.text),
                kind if Some(kind) == keep => sql.push_str(&segment.text),
                _ => {}
            }
        }

        let sql = match range {
            RangeFilter::Unbounded => sql,
            RangeFilter::From(from) => sql.replace(FROM_TOKEN, from),
            RangeFilter::To(to) => sql.replace(TO_TOKEN, to),
            RangeFilter::Between { from, to } => {
                sql.replace(FROM_TOKEN, from).replace(TO_TOKEN, to)
            }
        };

        Ok(sql
            .replace(PAGE_SIZE_TOKEN, &page.page_size.to_string())
            .replace(OFFSET_TOKEN, &page.offset().to_string()))
    }
}

fn push_other(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment {
            kind: SegmentKind::Other,
            text: text.to_string(),
        });
    }
}

/// A clause carrying both bound tokens, or `BETWEEN`, is the between clause;
/// otherwise the comparison operator in front of the bound token decides.
fn classify(clause: &str) -> SegmentKind {
    let has_from = clause.contains(FROM_TOKEN);
    let has_to = clause.contains(TO_TOKEN);
    if clause.contains("BETWEEN") || (has_from && has_to) {
        SegmentKind::Between
    } else if has_from {
        bound_operator(clause, FROM_TOKEN).unwrap_or(SegmentKind::From)
    } else if has_to {
        bound_operator(clause, TO_TOKEN).unwrap_or(SegmentKind::To)
    } else {
        SegmentKind::Other
    }
}

fn bound_operator(clause: &str, token: &str) -> Option<SegmentKind> {
    let at = clause.find(token)?;
    let before = clause[..at].trim_end_matches(|c: char| c == '\'' || c == '"' || c.is_whitespace());
    let before = before.strip_suffix('=').unwrap_or(before);
    if before.ends_with("<>") {
        None
    } else if before.ends_with('>') {
        Some(SegmentKind::From)
    } else if before.ends_with('<') {
        Some(SegmentKind::To)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const RANGED: &str = "SELECT * FROM visits \
        WHERE m BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime' \
        WHERE m > ':metaModifiedFromDateTime' \
        WHERE m < ':metaModifiedToDateTime' \
        ORDER BY m OFFSET ':offset' LIMIT ':pageSize'";

    fn page(current_page: u64, page_size: u64) -> PageRequest {
        PageRequest {
            current_page,
            page_size,
        }
    }

    #[test]
    fn test_parse_tags_segments() {
        let template = QueryTemplate::parse(RANGED).unwrap();
        assert!(template.is_ranged());
        assert_eq!(
            template.segment_kinds(),
            vec![
                SegmentKind::Other,
                SegmentKind::Between,
                SegmentKind::From,
                SegmentKind::To,
                SegmentKind::Other,
            ]
        );
    }

    #[test]
    fn test_unbounded_drops_all_range_clauses() {
        let sql = QueryTemplate::parse(RANGED)
            .unwrap()
            .render(&RangeFilter::Unbounded, &page(0, 10))
            .unwrap();
        assert!(!sql.contains(WHERE));
        assert_eq!(sql, "SELECT * FROM visits ORDER BY m OFFSET 0 LIMIT 10");
    }

    #[test]
    fn test_from_keeps_lower_bound_clause() {
        let sql = QueryTemplate::parse(RANGED)
            .unwrap()
            .render(
                &RangeFilter::From("2023-05-01T00:00:00.000Z".to_string()),
                &page(2, 25),
            )
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM visits WHERE m > '2023-05-01T00:00:00.000Z' ORDER BY m OFFSET 50 LIMIT 25"
        );
    }

    #[test]
    fn test_clause_order_does_not_matter() {
        let reordered = "SELECT * FROM v WHERE m < ':metaModifiedToDateTime' \
            WHERE m BETWEEN ':metaModifiedFromDateTime' AND ':metaModifiedToDateTime' \
            WHERE m > ':metaModifiedFromDateTime' ORDER BY m";
        let sql = QueryTemplate::parse(reordered)
            .unwrap()
            .render(&RangeFilter::To("X".to_string()), &page(0, 1))
            .unwrap();
        assert_eq!(sql, "SELECT * FROM v WHERE m < 'X' ORDER BY m");
    }

    #[test]
    fn test_missing_order_is_malformed() {
        let err = QueryTemplate::parse("SELECT * FROM v WHERE m > 1").unwrap_err();
        assert!(matches!(err, AdeError::TemplateMalformed(_)));
    }

    #[test]
    fn test_partial_range_clauses_are_malformed() {
        let sql = "SELECT * FROM v WHERE m > ':metaModifiedFromDateTime' ORDER BY m";
        assert!(matches!(
            QueryTemplate::parse(sql),
            Err(AdeError::TemplateMalformed(_))
        ));
    }

    #[test]
    fn test_range_clause_without_token_is_malformed() {
        let sql = "SELECT * FROM v WHERE m BETWEEN 1 AND 2 \
            WHERE m > ':metaModifiedFromDateTime' WHERE m < ':metaModifiedToDateTime' ORDER BY m";
        assert!(matches!(
            QueryTemplate::parse(sql),
            Err(AdeError::TemplateMalformed(_))
        ));
    }

    #[test_case("WHERE m < ':metaModifiedToDateTime' AND flag <> 1", SegmentKind::To ; "upper bound with not-equal")]
    #[test_case("WHERE m >= ':metaModifiedFromDateTime' AND n < 5", SegmentKind::From ; "lower bound with less-than")]
    #[test_case("WHERE m <= :metaModifiedToDateTime", SegmentKind::To ; "unquoted upper bound")]
    #[test_case("WHERE m < ':metaModifiedFromDateTime'", SegmentKind::To ; "operator wins over token")]
    #[test_case("WHERE flag <> 1 AND n > 2", SegmentKind::Other ; "no bound token")]
    fn test_classify_by_bound_operator(clause: &str, expected: SegmentKind) {
        assert_eq!(classify(clause), expected);
    }

    #[test]
    fn test_unfiltered_template() {
        let template =
            QueryTemplate::parse("SELECT * FROM animals ORDER BY id LIMIT ':pageSize'").unwrap();
        assert!(!template.is_ranged());
        assert_eq!(
            template.render(&RangeFilter::Unbounded, &page(0, 5)).unwrap(),
            "SELECT * FROM animals ORDER BY id LIMIT 5"
        );
        assert_eq!(
            template
                .render(&RangeFilter::From("2023-05-01T00:00:00.000Z".to_string()), &page(1, 5))
                .unwrap(),
            "SELECT * FROM animals ORDER BY id LIMIT 5"
        );
    }

    #[test]
    fn test_unrelated_where_is_kept() {
        let template =
            QueryTemplate::parse("SELECT * FROM animals WHERE active = 1 ORDER BY id").unwrap();
        assert!(!template.is_ranged());
        assert_eq!(
            template.render(&RangeFilter::Unbounded, &page(0, 5)).unwrap(),
            "SELECT * FROM animals WHERE active = 1 ORDER BY id"
        );
    }
}
