//! This module contains [`SceneConfig`], which brings together the config for every part of the
//! scene.

use crate::{Palette, PlacementConfig, SceneError};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{info, instrument, warn};
use wt_animation::{FallConfig, FlightConfig, MaterializeConfig};
use wt_gesture::GestureConfig;
use wt_particles::{RingsConfig, SnowConfig, SparkleConfig, TreeConfig};

cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "bench"))] {
        /// Get an RNG for a scene with no fixed seed. Tests and benchmarks always get the same one.
        fn unseeded_rng() -> StdRng {
            StdRng::seed_from_u64(12345)
        }
    } else {
        /// Get an RNG for a scene with no fixed seed.
        fn unseeded_rng() -> StdRng {
            StdRng::from_entropy()
        }
    }
}

/// The config for the whole scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The particles of the tree.
    pub tree: TreeConfig,

    /// The snow.
    pub snow: SnowConfig,

    /// The rings around the base of the tree.
    pub rings: RingsConfig,

    /// The cloud of sparkles drawn at the head of each wish.
    pub sparkle: SparkleConfig,

    /// Where decorations go.
    pub placement: PlacementConfig,

    /// How gifts fall.
    pub fall: FallConfig,

    /// How wishes fly.
    pub flight: FlightConfig,

    /// How ornaments appear.
    pub materialize: MaterializeConfig,

    /// How hand gestures move the scene.
    pub gesture: GestureConfig,

    /// The colours of gifts.
    pub gift_palette: Palette,

    /// The colours of ornaments.
    pub ornament_palette: Palette,

    /// The images in the gifts that are there when the scene starts.
    pub default_gift_images: Vec<String>,

    /// The wishes already hanging on the tree when the scene starts.
    pub default_wishes: Vec<String>,

    /// The number of seconds between a wish arriving and its ornament appearing.
    pub ornament_delay: f32,

    /// How bright the tree glows when a wish arrives, in [0, 1].
    pub arrival_pulse: f32,

    /// How much of the glow fades away per second.
    pub pulse_decay: f32,

    /// How far above the tip of the tree the topper sits. Wishes fly to the topper.
    pub topper_clearance: f32,

    /// How fast the topper spins, in radians per second.
    pub topper_spin_speed: f32,

    /// The offset of the whole interactive group.
    pub root_offset: Vec3,

    /// A seed for the RNG, to get the same scene every time. If this is `None`, every scene is
    /// different.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let r2 = "https://pub-186562a1884d41cab825cea6778eec78.r2.dev";

        Self {
            tree: TreeConfig::default(),
            snow: SnowConfig::default(),
            rings: RingsConfig::default(),
            sparkle: SparkleConfig::default(),
            placement: PlacementConfig::default(),
            fall: FallConfig::default(),
            flight: FlightConfig::default(),
            materialize: MaterializeConfig::default(),
            gesture: GestureConfig::default(),
            gift_palette: Palette::gifts(),
            ornament_palette: Palette::ornaments(),
            default_gift_images: ["IMG_1985", "IMG_1986", "IMG_1987", "IMG_5316", "IMG_7368"]
                .into_iter()
                .map(|name| format!("{r2}/{name}.jpg"))
                .collect(),
            default_wishes: [
                "MISS U SO MUCH",
                "希望你在我身边",
                "早日遇到你爱也真诚爱你的男人",
                "祝你平安顺遂的度过这个本命年尾巴",
                "最好的熹，见字如晤，今年真的是发生了很多事情的一年呢。我好像终于学会了及时止损，拥有了大刀阔斧斩断消耗自己的关系的决心，无论是爱情还是友情。代价是，冻结了我的期待、相信和热情。于是我把自己蜷缩起来度过这个秋冬，感受平和。我有默默想念很多次打个车就去你家过周末的时刻，在沙漠里看星空的时刻，一起蹦了不知道多少场迪...也在适应不擅长的异地关系。慢慢学会接受关系的“平淡”，荣亲的珍贵在与细水长流。其实我觉得咱们俩都是情感内敛，报喜不报忧的类型。但如果你需要我，我一直都在。春天就要来啦，我们一定都会幸福的！爱你的JBL",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            ornament_delay: 1.,
            arrival_pulse: 0.8,
            pulse_decay: 0.7,
            topper_clearance: 0.5,
            topper_spin_speed: 1.5,
            root_offset: Vec3::new(0., -6., 0.),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Load the config from the given RON file, or use the default if the file is missing or
    /// invalid. In that case, the default is also written to the file for future editing.
    #[instrument]
    pub fn from_file(path: &Path) -> Self {
        let write_and_return_default = || -> Self {
            let default = Self::default();
            if let Err(error) = default.save_to_file(path) {
                warn!(%error, "Unable to write default scene config");
            }
            default
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                info!(%error, "No scene config, so using the default");
                return write_and_return_default();
            }
        };

        match ron::from_str(&text) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "Invalid scene config, so replacing it with the default");
                write_and_return_default()
            }
        }
    }

    /// Save the config to the given file as pretty RON, creating parent directories as needed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::DirBuilder::new().recursive(true).create(parent)?;
        }

        let text = ron::ser::to_string_pretty(self, PrettyConfig::default().struct_names(true))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// The point that wishes fly to and the topper sits at.
    pub fn apex(&self) -> Vec3 {
        Vec3::new(0., self.tree.height + self.topper_clearance, 0.)
    }

    /// Make the RNG for a scene with this config.
    pub(crate) fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => unseeded_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config_path(name: &str) -> std::path::PathBuf {
        env::temp_dir()
            .join(format!("wt-scene-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_config_writes_default_test() {
        let path = temp_config_path("missing.ron");
        let _ = fs::remove_file(&path);

        assert_eq!(SceneConfig::from_file(&path), SceneConfig::default());
        assert!(path.exists());

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("SceneConfig("));
        assert_eq!(ron::from_str::<SceneConfig>(&text).unwrap(), SceneConfig::default());
    }

    #[test]
    fn saved_config_loads_test() {
        let path = temp_config_path("saved.ron");
        let config = SceneConfig {
            ornament_delay: 2.5,
            seed: Some(7),
            ..SceneConfig::default()
        };

        config.save_to_file(&path).unwrap();
        assert_eq!(SceneConfig::from_file(&path), config);
    }

    #[test]
    fn invalid_config_is_replaced_test() {
        let path = temp_config_path("invalid.ron");
        fs::DirBuilder::new()
            .recursive(true)
            .create(path.parent().unwrap())
            .unwrap();
        fs::write(&path, "this is not RON").unwrap();

        assert_eq!(SceneConfig::from_file(&path), SceneConfig::default());
        assert_ne!(fs::read_to_string(&path).unwrap(), "this is not RON");
    }

    #[test]
    fn partial_config_uses_defaults_test() {
        let config: SceneConfig = ron::from_str("(ornament_delay: 3.0, seed: Some(1))").unwrap();
        assert_eq!(config.ornament_delay, 3.);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.tree, TreeConfig::default());
    }
}
