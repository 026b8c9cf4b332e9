//! Placeholder materialization over Document Trees

use tracing::{debug, instrument};

use crate::error::{BoxError, Error, ErrorKind, Result};
use crate::tree::{Node, Object};

/// Resolves placeholders embedded in a text leaf
///
/// Implementations own the placeholder syntax; text without placeholders
/// should come back unchanged.
pub trait Evaluator {
    fn evaluate(&self, text: &str) -> std::result::Result<String, BoxError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str) -> std::result::Result<String, BoxError>,
{
    fn evaluate(&self, text: &str) -> std::result::Result<String, BoxError> {
        self(text)
    }
}

/// Evaluator that recognizes no placeholders
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl Evaluator for PassThrough {
    fn evaluate(&self, text: &str) -> std::result::Result<String, BoxError> {
        Ok(text.to_string())
    }
}

/// Build a new tree with every text leaf run through the evaluator
///
/// The first evaluator failure aborts the whole pass; no partially
/// materialized tree is ever returned.
#[instrument(level = "debug", skip_all, fields(top_level = tree.len()))]
pub fn materialize<E: Evaluator + ?Sized>(tree: &Object, evaluator: &E) -> Result<Object> {
    let mut path = Vec::new();
    let result = materialize_object(tree, evaluator, &mut path)?;
    debug!("materialized tree");
    Ok(result)
}

fn materialize_object<'t, E: Evaluator + ?Sized>(
    obj: &'t Object,
    evaluator: &E,
    path: &mut Vec<&'t str>,
) -> Result<Object> {
    let mut out = Object::new();
    for (key, child) in obj {
        path.push(key);
        let node = match child {
            Node::Object(inner) => Node::Object(materialize_object(inner, evaluator, path)?),
            Node::Text(text) => Node::Text(evaluator.evaluate(text).map_err(|source| {
                Error::with_detail(ErrorKind::Evaluation, format!("at {}", path.join(".")))
                    .with_source(source)
            })?),
            Node::Null => Node::Null,
        };
        path.pop();
        out.insert(key.clone(), node);
    }
    Ok(out)
}
