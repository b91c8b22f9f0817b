//! Typed model identifiers
//!
//! Model names only exist as strings at the asset boundary. Everything past
//! the load phase refers to models by these enums.

use serde::{Deserialize, Serialize};

macro_rules! model_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $asset:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $asset)]
                $variant,
            )+
        }

        impl $name {
            /// Every model, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Asset name
            pub fn asset_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $asset,)+
                }
            }

            /// Resolve an asset name
            pub fn from_asset_name(name: &str) -> Option<Self> {
                match name {
                    $($asset => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.asset_name())
            }
        }
    };
}

model_enum! {
    /// Procedurally placed building models
    BuildingModel {
        AncientBuilding => "ancient_building",
        DesertStoneHouse => "desert_stone_house",
        FantasyHouse => "fantasy_house",
        OldCastle => "old_castle",
        OldCastle1 => "old_castle_1",
        OldHouse => "old_house",
        OldHouse1 => "old_house_1",
        StoneBuilding => "stone_building",
        TreeckoHouse => "pokemon_treecko_house",
        PsyduckHouse => "pokemon_psyduck_house",
        PikachuHouse => "pokemon_pikachu_house",
        MudkipHouse => "mudkip_house",
        MeowthHouse => "meowth_house",
        MachopHouse => "machop_house",
        CyndaquilHouse => "cyndaquil_house",
        CuboneHouse => "cubone_house",
        ChikoritaHouse => "chikorita_house",
        CharmanderHouse => "charmander_house",
        BulbasaurHouse => "bulbasaur_house",
    }
}

model_enum! {
    /// Enemy character models
    EnemyModel {
        FastRun => "enemyFastRun",
        MutantWalking => "enemyMutantWalking",
        Walk => "enemyWalk",
        Walking => "enemyWalking",
        WheelbarrowWalk => "enemyWheelbarrowWalk",
    }
}

impl BuildingModel {
    /// Medieval town pool
    pub const TOWN: &'static [BuildingModel] = &[
        BuildingModel::AncientBuilding,
        BuildingModel::DesertStoneHouse,
        BuildingModel::FantasyHouse,
        BuildingModel::OldCastle,
        BuildingModel::OldCastle1,
        BuildingModel::OldHouse,
        BuildingModel::OldHouse1,
        BuildingModel::StoneBuilding,
    ];

    /// Monster house pool
    pub const MONSTER_HOUSES: &'static [BuildingModel] = &[
        BuildingModel::TreeckoHouse,
        BuildingModel::PsyduckHouse,
        BuildingModel::PikachuHouse,
        BuildingModel::MudkipHouse,
        BuildingModel::MeowthHouse,
        BuildingModel::MachopHouse,
        BuildingModel::CyndaquilHouse,
        BuildingModel::CuboneHouse,
        BuildingModel::ChikoritaHouse,
        BuildingModel::CharmanderHouse,
        BuildingModel::BulbasaurHouse,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_names_roundtrip() {
        for model in BuildingModel::ALL {
            assert_eq!(BuildingModel::from_asset_name(model.asset_name()), Some(*model));
        }
        assert_eq!(EnemyModel::from_asset_name("enemyWalk"), Some(EnemyModel::Walk));
        assert_eq!(EnemyModel::from_asset_name("robot"), None);
    }

    #[test]
    fn test_pools_partition_all() {
        assert_eq!(
            BuildingModel::TOWN.len() + BuildingModel::MONSTER_HOUSES.len(),
            BuildingModel::ALL.len()
        );
    }

    #[test]
    fn test_serde_uses_asset_name() {
        let json = serde_json::to_string(&BuildingModel::OldCastle1).unwrap();
        assert_eq!(json, "\"old_castle_1\"");
    }
}
