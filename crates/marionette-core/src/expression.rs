//! Expression / Texture Resolution
//!
//! Maps the mascot's discrete mood to the face texture applied to its head
//! model. Resolution is a pure registry lookup; the single apply side effect
//! lives in [`FaceMaterial`] so the decision logic stays testable without a
//! rendering binding.
//!
//! Only the face-surface texture ever changes with mood. The head geometry,
//! body color and lighting are untouched by expression swaps.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Discrete mood of the mascot face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    /// Resting face
    #[default]
    Neutral,
    /// Smiling face
    Happy,
    /// Frowning face
    Sad,
    /// Nervous face with a sweat drop
    Sweat,
    /// Featureless face
    Blank,
}

impl Expression {
    /// All defined expressions, in declaration order.
    pub const ALL: [Expression; 5] = [
        Expression::Neutral,
        Expression::Happy,
        Expression::Sad,
        Expression::Sweat,
        Expression::Blank,
    ];

    /// Logical asset key for this expression's face texture.
    pub fn asset_key(&self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Sweat => "sweat",
            Expression::Blank => "blank",
        }
    }
}

/// Handle to a loaded face texture, addressed by logical asset key.
///
/// Asset loading itself is an external collaborator; the core only ever
/// passes these handles through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureHandle {
    /// Logical asset key, e.g. `"faces/happy.png"`.
    pub key: String,
}

impl TextureHandle {
    /// Create a handle from a logical asset key.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Registry mapping expressions to face textures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureResolver {
    textures: HashMap<Expression, TextureHandle>,
}

impl TextureResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with the five standard faces registered under
    /// `faces/<expression>.png`.
    pub fn with_standard_faces() -> Self {
        let mut resolver = Self::new();
        for expr in Expression::ALL {
            let handle = TextureHandle::new(format!("faces/{}.png", expr.asset_key()));
            // Keys are non-empty by construction
            let _ = resolver.register(expr, handle);
        }
        resolver
    }

    /// Register (or replace) the texture for an expression.
    pub fn register(
        &mut self,
        expression: Expression,
        handle: TextureHandle,
    ) -> Result<(), CoreError> {
        if handle.key.is_empty() {
            return Err(CoreError::EmptyTextureKey { expression });
        }
        self.textures.insert(expression, handle);
        Ok(())
    }

    /// Resolve an expression to its registered texture, if any. Pure lookup.
    pub fn resolve(&self, expression: Expression) -> Option<&TextureHandle> {
        self.textures.get(&expression)
    }

    /// Whether a texture is registered for `expression`.
    pub fn is_registered(&self, expression: Expression) -> bool {
        self.textures.contains_key(&expression)
    }
}

/// The face-surface material binding: holds the currently applied texture.
///
/// Applying an expression with no registered texture leaves the previous
/// texture in place. Clearing the face would flash an untextured surface,
/// which is never acceptable mid-session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceMaterial {
    current: Option<TextureHandle>,
}

impl FaceMaterial {
    /// Create a material with no texture applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the texture for `expression`. Returns `true` when the applied
    /// texture actually changed.
    pub fn apply(&mut self, resolver: &TextureResolver, expression: Expression) -> bool {
        match resolver.resolve(expression) {
            Some(handle) => {
                if self.current.as_ref() == Some(handle) {
                    false
                } else {
                    self.current = Some(handle.clone());
                    true
                }
            }
            None => {
                warn!(
                    expression = expression.asset_key(),
                    "no texture registered; keeping current face"
                );
                false
            }
        }
    }

    /// The currently applied texture, if any has ever been applied.
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_standard_faces() {
        let resolver = TextureResolver::with_standard_faces();
        for expr in Expression::ALL {
            assert!(resolver.resolve(expr).is_some());
        }
        assert_eq!(
            resolver.resolve(Expression::Happy).unwrap().key,
            "faces/happy.png"
        );
    }

    #[test]
    fn test_unregistered_expression_keeps_current_texture() {
        let mut resolver = TextureResolver::new();
        resolver
            .register(Expression::Neutral, TextureHandle::new("faces/neutral.png"))
            .unwrap();

        let mut face = FaceMaterial::new();
        assert!(face.apply(&resolver, Expression::Neutral));

        // Happy was never registered: the neutral face must survive
        assert!(!face.apply(&resolver, Expression::Happy));
        assert_eq!(face.texture().unwrap().key, "faces/neutral.png");
    }

    #[test]
    fn test_reapplying_same_expression_is_a_no_op() {
        let resolver = TextureResolver::with_standard_faces();
        let mut face = FaceMaterial::new();

        assert!(face.apply(&resolver, Expression::Sad));
        assert!(!face.apply(&resolver, Expression::Sad));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut resolver = TextureResolver::new();
        let err = resolver.register(Expression::Blank, TextureHandle::new(""));
        assert!(err.is_err());
    }
}
