//! Typed model registry
//!
//! Models are named by [`ModelKey`] everywhere past the load phase. The
//! load phase checks the required models in one pass and reports every
//! missing one at once.

use chase_core::MissingResourceError;
use chase_gamestate::{BuildingModel, EnemyModel};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies a model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKey {
    Player,
    Cheese,
    Portal,
    Road,
    Floor,
    Enemy(EnemyModel),
    Building(BuildingModel),
    /// Level data model, by record name
    Block(String),
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKey::Player => f.write_str("player"),
            ModelKey::Cheese => f.write_str("cheese"),
            ModelKey::Portal => f.write_str("portal"),
            ModelKey::Road => f.write_str("road"),
            ModelKey::Floor => f.write_str("floor"),
            ModelKey::Enemy(model) => write!(f, "{}", model),
            ModelKey::Building(model) => write!(f, "{}", model),
            ModelKey::Block(name) => write!(f, "block:{}", name),
        }
    }
}

/// Raw (unscaled) bounds of a model in its local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInfo {
    pub bbox_min: [f32; 3],
    pub bbox_max: [f32; 3],
}

impl ModelInfo {
    pub fn new(bbox_min: [f32; 3], bbox_max: [f32; 3]) -> Self {
        Self { bbox_min, bbox_max }
    }

    /// Box of `size` standing on the local origin, centred in X and Z
    pub fn grounded(size: [f32; 3]) -> Self {
        Self::new([-size[0] / 2.0, 0.0, -size[2] / 2.0], [size[0] / 2.0, size[1], size[2] / 2.0])
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.bbox_max[0] - self.bbox_min[0],
            self.bbox_max[1] - self.bbox_min[1],
            self.bbox_max[2] - self.bbox_min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.bbox_max[0] + self.bbox_min[0]) / 2.0,
            (self.bbox_max[1] + self.bbox_min[1]) / 2.0,
            (self.bbox_max[2] + self.bbox_min[2]) / 2.0,
        ]
    }

    pub fn max_dimension(&self) -> f32 {
        let s = self.size();
        s[0].max(s[1]).max(s[2])
    }

    /// Height that puts the model's base on the ground at `scale`
    pub fn ground_offset(&self, scale: f32) -> f32 {
        -self.bbox_min[1] * scale
    }
}

/// Models an asset pack provides
#[derive(Debug, Clone, Default)]
pub struct ResourceManifest {
    models: BTreeMap<ModelKey, ModelInfo>,
    /// Bounds for block records without their own entry
    block_fallback: Option<ModelInfo>,
}

impl ResourceManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock asset pack
    pub fn builtin() -> Self {
        let mut manifest = Self::new()
            .with(ModelKey::Player, ModelInfo::grounded([0.8, 0.8, 0.8]))
            .with(ModelKey::Cheese, ModelInfo::grounded([0.6, 0.4, 0.6]))
            .with(ModelKey::Portal, ModelInfo::grounded([3.0, 4.0, 0.5]))
            .with(ModelKey::Road, ModelInfo::grounded([1.0, 0.01, 1.0]))
            .with(ModelKey::Floor, ModelInfo::grounded([1.0, 0.01, 1.0]))
            .with_block_fallback(ModelInfo::grounded([80.0, 120.0, 80.0]));

        for model in EnemyModel::ALL {
            manifest.insert(ModelKey::Enemy(*model), ModelInfo::grounded([0.8, 1.8, 0.8]));
        }
        for (i, model) in BuildingModel::ALL.iter().enumerate() {
            let s = 0.3 + 0.03 * i as f32;
            manifest.insert(ModelKey::Building(*model), ModelInfo::grounded([s, s * 0.8, s * 0.9]));
        }
        manifest
    }

    pub fn with(mut self, key: ModelKey, info: ModelInfo) -> Self {
        self.insert(key, info);
        self
    }

    pub fn with_block_fallback(mut self, info: ModelInfo) -> Self {
        self.block_fallback = Some(info);
        self
    }

    pub fn insert(&mut self, key: ModelKey, info: ModelInfo) {
        self.models.insert(key, info);
    }

    pub fn remove(&mut self, key: &ModelKey) -> Option<ModelInfo> {
        self.models.remove(key)
    }

    fn resolve(&self, key: &ModelKey) -> Option<ModelInfo> {
        match (self.models.get(key), key) {
            (Some(info), _) => Some(*info),
            (None, ModelKey::Block(_)) => self.block_fallback,
            (None, _) => None,
        }
    }
}

/// Validated models for a session
#[derive(Debug, Clone)]
pub struct ResourceSet {
    manifest: ResourceManifest,
}

impl ResourceSet {
    /// Models a session cannot run without
    pub const REQUIRED: &'static [ModelKey] = &[ModelKey::Player, ModelKey::Cheese, ModelKey::Portal];

    /// Check `required` against `manifest`
    ///
    /// Models outside `required` may still be missing; the world skips
    /// entities that use them.
    pub fn load(manifest: ResourceManifest, required: &[ModelKey]) -> Result<Self, MissingResourceError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|key| manifest.resolve(key).is_none())
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(MissingResourceError { missing });
        }
        Ok(Self { manifest })
    }

    pub fn get(&self, key: &ModelKey) -> Option<ModelInfo> {
        self.manifest.resolve(key)
    }

    /// Like [`get`](Self::get), as a core error
    pub fn require(&self, key: &ModelKey) -> chase_core::Result<ModelInfo> {
        self.get(key)
            .ok_or_else(|| MissingResourceError::single(key.to_string()).into())
    }

    pub fn contains(&self, key: &ModelKey) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let set = ResourceSet::load(ResourceManifest::builtin(), ResourceSet::REQUIRED).unwrap();
        assert!(set.contains(&ModelKey::Building(BuildingModel::OldCastle)));
        assert!(set.contains(&ModelKey::Block("house_7".into())), "blocks use the fallback");
    }

    #[test]
    fn test_all_missing_reported() {
        let manifest = ResourceManifest::new().with(ModelKey::Player, ModelInfo::grounded([1.0; 3]));
        let err = ResourceSet::load(manifest, ResourceSet::REQUIRED).unwrap_err();
        assert_eq!(err.missing, vec!["cheese".to_string(), "portal".to_string()]);
    }

    #[test]
    fn test_require_missing_is_resource_error() {
        let mut manifest = ResourceManifest::builtin();
        manifest.remove(&ModelKey::Enemy(EnemyModel::Walk));
        let set = ResourceSet::load(manifest, ResourceSet::REQUIRED).unwrap();
        assert!(matches!(
            set.require(&ModelKey::Enemy(EnemyModel::Walk)),
            Err(chase_core::Error::ResourceMissing(_))
        ));
    }

    #[test]
    fn test_model_info_geometry() {
        let info = ModelInfo::new([-1.0, -2.0, -3.0], [1.0, 4.0, 3.0]);
        assert_eq!(info.size(), [2.0, 6.0, 6.0]);
        assert_eq!(info.center(), [0.0, 1.0, 0.0]);
        assert_eq!(info.max_dimension(), 6.0);
        assert_eq!(info.ground_offset(0.5), 1.0);
    }
}
