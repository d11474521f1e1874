use std::collections::BTreeSet;

use tracing::{debug, trace};
use vouch_core_types::Side;

use super::model::{Mismatch, MismatchDetail};
use super::options::EquivalenceOptions;
use super::path::Path;
use crate::classify::{classify, kind_of};
use crate::errors::ComparisonError;
use crate::render;
use crate::value::{Collection, Dictionary, Grouping, Member, Special, Structural, Value};

type Outcome = Result<(), Mismatch>;

/// Decide whether `actual` is equivalent to `expected`
///
/// # Errors
///
/// Returns the first [`Mismatch`] found in traversal order.
pub fn equivalent(expected: &Value, actual: &Value, options: &EquivalenceOptions) -> Outcome {
    let result = Engine::new(options).compare(expected, actual, &Path::root(), 1);
    if let Err(mismatch) = &result {
        debug!(
            kind = ?mismatch.kind(),
            path = %mismatch.path,
            strict = options.is_strict(),
            "equivalence mismatch"
        );
    }
    result
}

/// Identities of one expected/actual pair on the traversal stack
type Visit = (Option<usize>, Option<usize>);

/// One traversal: options plus the stack of container pairs currently being
/// compared
struct Engine<'o> {
    options: &'o EquivalenceOptions,
    visiting: Vec<Visit>,
}

impl<'o> Engine<'o> {
    fn new(options: &'o EquivalenceOptions) -> Self {
        Self {
            options,
            visiting: Vec::new(),
        }
    }

    /// Check the pair against the stack
    ///
    /// Revisiting a pair that is already being compared is equal: both
    /// graphs loop back to the same point. Only one side looping back is a
    /// circular reference on that side.
    fn revisit(&self, pair: Visit, path: &Path) -> Option<Outcome> {
        let (expected_id, actual_id) = pair;
        let looped = expected_id.and_then(|id| self.visiting.iter().find(|v| v.0 == Some(id)));
        if let Some(visit) = looped {
            return Some(if visit.1 == actual_id {
                Ok(())
            } else {
                Err(circular(path, Side::Expected))
            });
        }
        if actual_id.is_some() && self.visiting.iter().any(|v| v.1 == actual_id) {
            return Some(Err(circular(path, Side::Actual)));
        }
        None
    }

    fn compare(&mut self, expected: &Value, actual: &Value, path: &Path, depth: usize) -> Outcome {
        if self.options.exclusions().contains(path) {
            trace!(path = %path, "excluded");
            return Ok(());
        }

        if depth > self.options.max_depth() {
            return Err(Mismatch::new(
                path.clone(),
                MismatchDetail::DepthExceeded {
                    max_depth: self.options.max_depth(),
                },
            ));
        }

        match (expected, actual) {
            (Value::Null, Value::Null) => return Ok(()),
            (Value::Null, _) | (_, Value::Null) => return Err(value_differs(path, expected, actual)),
            (Value::Lazy(lazy), _) => return self.compare(&lazy.force(), actual, path, depth),
            (_, Value::Lazy(lazy)) => return self.compare(expected, &lazy.force(), path, depth),
            _ => {}
        }

        let pair = (expected.identity(), actual.identity());
        if let Some(outcome) = self.revisit(pair, path) {
            return outcome;
        }
        if pair.0.is_some() && pair.0 == pair.1 {
            return Ok(());
        }

        trace!(
            path = %path,
            depth,
            expected_kind = ?kind_of(expected),
            actual_kind = ?kind_of(actual),
            "compare"
        );

        let tracked = pair.0.is_some() || pair.1.is_some();
        if tracked {
            self.visiting.push(pair);
        }
        let result = self.compare_classified(expected, actual, path, depth);
        if tracked {
            self.visiting.pop();
        }
        result
    }

    /// Run a comparison whose failure only means "no match"
    ///
    /// Depth and cycle failures are never a mere non-match; they abort the
    /// enclosing search.
    fn probe(
        &mut self,
        expected: &Value,
        actual: &Value,
        path: &Path,
        depth: usize,
    ) -> Result<bool, Mismatch> {
        match self.compare(expected, actual, path, depth) {
            Ok(()) => Ok(true),
            Err(mismatch) if mismatch.is_fatal() => Err(mismatch),
            Err(_) => Ok(false),
        }
    }

    fn compare_classified(&mut self, expected: &Value, actual: &Value, path: &Path, depth: usize) -> Outcome {
        match (expected, actual) {
            (Value::Scalar(e), Value::Scalar(a)) => {
                if e.equivalent(a) {
                    Ok(())
                } else {
                    Err(value_differs(path, expected, actual))
                }
            }
            (Value::Scalar(_), _) | (_, Value::Scalar(_)) => Err(value_differs(path, expected, actual)),

            (Value::Str(e), Value::Str(a)) => {
                if e == a {
                    Ok(())
                } else {
                    Err(value_differs(path, expected, actual))
                }
            }
            (Value::Special(e), Value::Special(a)) => special_outcome(e.equals(a), path, expected, actual),
            (Value::Str(text), Value::Special(a)) => {
                let parsed = Special::parse_as(a.kind(), text);
                special_outcome(parsed.and_then(|p| p.equals(a)), path, expected, actual)
            }
            (Value::Special(e), Value::Str(_)) => {
                let cause = ComparisonError::Incomparable {
                    expected_type: e.kind().type_name().to_string(),
                    actual_type: actual.type_name(),
                };
                Err(comparison_threw(path, expected, actual, cause))
            }
            (Value::Str(_) | Value::Special(_), _) | (_, Value::Str(_) | Value::Special(_)) => {
                Err(value_differs(path, expected, actual))
            }

            (Value::Map(e), Value::Map(a)) => {
                self.compare_dictionaries(expected, e, actual, a, path, depth)
            }
            (Value::Grouping(e), Value::Grouping(a)) => self.compare_groupings(e, a, path, depth),
            (Value::Seq(e) | Value::Set(e), Value::Seq(a) | Value::Set(a)) => {
                self.compare_collections(expected, e, actual, a, path, depth)
            }
            (Value::Record(e), Value::Record(a)) => self.compare_records(e.as_ref(), a.as_ref(), path, depth),

            _ => Err(Mismatch::new(
                path.clone(),
                MismatchDetail::TypesDiffer {
                    expected: classify(expected).type_name,
                    actual: classify(actual).type_name,
                },
            )),
        }
    }

    fn compare_dictionaries(
        &mut self,
        expected_value: &Value,
        expected: &Dictionary,
        actual_value: &Value,
        actual: &Dictionary,
        path: &Path,
        depth: usize,
    ) -> Outcome {
        let mut pool: Vec<&(Value, Value)> = actual.entries().iter().collect();

        for (key, value) in expected.entries() {
            let mut matched = None;
            for (i, (candidate_key, candidate_value)) in pool.iter().enumerate() {
                if self.probe(key, candidate_key, path, depth + 1)?
                    && self.probe(value, candidate_value, path, depth + 1)?
                {
                    matched = Some(i);
                    break;
                }
            }
            match matched {
                Some(i) => {
                    pool.remove(i);
                }
                None => {
                    return Err(Mismatch::new(
                        path.clone(),
                        MismatchDetail::CollectionValueMissing {
                            expected: render::format_entry(key, value),
                            actual: render::format(actual_value),
                        },
                    ))
                }
            }
        }

        if self.options.is_strict() && !pool.is_empty() {
            let leftovers: Vec<String> = pool
                .iter()
                .map(|(k, v)| render::format_entry(k, v))
                .collect();
            return Err(Mismatch::new(
                path.clone(),
                MismatchDetail::ExtraValuesFound {
                    expected: render::format(expected_value),
                    leftovers: format!("[{}]", leftovers.join(", ")),
                    actual: render::format(actual_value),
                },
            ));
        }
        Ok(())
    }

    fn compare_collections(
        &mut self,
        expected_value: &Value,
        expected: &Collection,
        actual_value: &Value,
        actual: &Collection,
        path: &Path,
        depth: usize,
    ) -> Outcome {
        let mut pool: Vec<&Value> = actual.items().iter().collect();

        for item in expected.items() {
            let mut matched = None;
            for (i, candidate) in pool.iter().enumerate() {
                if let (Value::Grouping(e), Value::Grouping(a)) = (item, *candidate) {
                    if !self.probe(&e.key, &a.key, path, depth + 1)? {
                        continue;
                    }
                    self.grouping_values(e, a, path, depth)?;
                    matched = Some(i);
                    break;
                }
                if self.probe(item, candidate, path, depth + 1)? {
                    matched = Some(i);
                    break;
                }
            }
            match matched {
                Some(i) => {
                    pool.remove(i);
                }
                None => {
                    return Err(Mismatch::new(
                        path.clone(),
                        MismatchDetail::CollectionValueMissing {
                            expected: render::format(item),
                            actual: render::format(actual_value),
                        },
                    ))
                }
            }
        }

        if self.options.is_strict() && !pool.is_empty() {
            let leftovers: Vec<Value> = pool.into_iter().cloned().collect();
            return Err(Mismatch::new(
                path.clone(),
                MismatchDetail::ExtraValuesFound {
                    expected: render::format(expected_value),
                    leftovers: render::format_items(&leftovers),
                    actual: render::format(actual_value),
                },
            ));
        }
        Ok(())
    }

    fn compare_groupings(&mut self, expected: &Grouping, actual: &Grouping, path: &Path, depth: usize) -> Outcome {
        self.compare(&expected.key, &actual.key, path, depth + 1)?;
        self.grouping_values(expected, actual, path, depth)
    }

    /// Values of two groupings whose keys already match
    fn grouping_values(&mut self, expected: &Grouping, actual: &Grouping, path: &Path, depth: usize) -> Outcome {
        let expected_items = Value::Seq(expected.items.clone());
        let actual_items = Value::Seq(actual.items.clone());
        if self.probe(&expected_items, &actual_items, path, depth + 1)? {
            return Ok(());
        }
        Err(Mismatch::new(
            path.clone(),
            MismatchDetail::GroupingValuesDiffer {
                key: render::format(&expected.key),
                expected: render::format(&expected_items),
                actual: render::format(&actual_items),
            },
        ))
    }

    fn compare_records(
        &mut self,
        expected: &dyn Structural,
        actual: &dyn Structural,
        path: &Path,
        depth: usize,
    ) -> Outcome {
        let (expected_type, actual_type) = (expected.type_name(), actual.type_name());
        if (expected.is_nominal() || actual.is_nominal()) && expected_type != actual_type {
            return Err(Mismatch::new(
                path.clone(),
                MismatchDetail::TypesDiffer {
                    expected: expected_type,
                    actual: actual_type,
                },
            ));
        }

        let expected_members = self.visible_members(expected, path);
        let actual_members = self.visible_members(actual, path);

        let expected_names: BTreeSet<&str> = expected_members.iter().map(Member::name).collect();
        let actual_names: BTreeSet<&str> = actual_members.iter().map(Member::name).collect();
        let list_differs = if self.options.is_strict() {
            expected_names != actual_names
        } else {
            !expected_names.is_subset(&actual_names)
        };
        if list_differs {
            let qualify = |names: &BTreeSet<&str>| -> Vec<String> {
                names.iter().map(|n| path.qualify(n)).collect()
            };
            return Err(Mismatch::new(
                path.clone(),
                MismatchDetail::MemberListDiffers {
                    expected: qualify(&expected_names),
                    actual: qualify(&actual_names),
                },
            ));
        }

        for member in &expected_members {
            let Some(other) = actual_members.iter().find(|m| m.name() == member.name()) else {
                continue;
            };
            let child = path.child(member.name());
            match (member.value(), other.value()) {
                (Ok(e), Ok(a)) => self.compare(e, a, &child, depth + 1)?,
                (Err(err), _) | (_, Err(err)) => {
                    return Err(Mismatch::new(
                        child,
                        MismatchDetail::ComparisonThrew {
                            expected: member_display(member),
                            actual: member_display(other),
                        },
                    )
                    .with_cause(err.clone()))
                }
            }
        }
        Ok(())
    }

    fn visible_members(&self, record: &dyn Structural, path: &Path) -> Vec<Member> {
        let filter = self.options.member_filter();
        let exclusions = self.options.exclusions();
        record
            .members()
            .into_iter()
            .filter(|m| filter.include(m) && !exclusions.contains(&path.child(m.name())))
            .collect()
    }
}

fn value_differs(path: &Path, expected: &Value, actual: &Value) -> Mismatch {
    Mismatch::new(
        path.clone(),
        MismatchDetail::MemberValueDiffers {
            expected: render::format(expected),
            actual: render::format(actual),
        },
    )
}

fn comparison_threw(path: &Path, expected: &Value, actual: &Value, cause: ComparisonError) -> Mismatch {
    Mismatch::new(
        path.clone(),
        MismatchDetail::ComparisonThrew {
            expected: render::format(expected),
            actual: render::format(actual),
        },
    )
    .with_cause(cause)
}

fn special_outcome(
    result: Result<bool, ComparisonError>,
    path: &Path,
    expected: &Value,
    actual: &Value,
) -> Outcome {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(value_differs(path, expected, actual)),
        Err(cause) => Err(comparison_threw(path, expected, actual, cause)),
    }
}

fn circular(path: &Path, side: Side) -> Mismatch {
    Mismatch::new(path.clone(), MismatchDetail::CircularReference { side })
}

fn member_display(member: &Member) -> String {
    match member.value() {
        Ok(value) => render::format(value),
        Err(err) => format!("(throws: {})", err),
    }
}
