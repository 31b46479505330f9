mod tests {
    use tree_lights::config::{ConfigError, Settings, custom_mode};
    use tree_lights::driver::DriverKind;
    use tree_lights::{GeometryError, SceneId};

    const MINIMAL: &str = r#"
        [pixels]
        count = 10

        [pixels.angles]
        "0" = [0, 10]
        "180" = [5]
    "#;

    fn pixels_only(body: &str) -> Result<Settings, ConfigError> {
        Settings::parse(&format!("[pixels]\n{body}"))
    }

    #[test]
    fn test_minimal_settings_take_defaults() {
        let settings = Settings::parse(MINIMAL).unwrap();
        assert_eq!(settings.frame.fps, 60.0);
        assert_eq!(settings.frame.spin_step, 12);
        assert_eq!(settings.frame.spin_limit, 450);
        assert!(settings.transport.listen.is_none());
        assert_eq!(settings.display.driver, DriverKind::Terminal);
        assert_eq!(settings.display.brightness, 31);
    }

    #[test]
    fn test_geometry_from_settings() {
        let settings = Settings::parse(MINIMAL).unwrap();
        let geometry = settings.pixels.geometry().unwrap();
        assert_eq!(geometry.count(), 10);
        assert_eq!(geometry.angle(5), 180.0);
        assert!((geometry.angle(2) - 72.0).abs() < 1e-3);
        assert!((geometry.angle(7) - 252.0).abs() < 1e-3);
    }

    #[test]
    fn test_full_settings() {
        let settings = Settings::parse(
            r#"
            [pixels]
            count = 4
            [pixels.angles]
            "0" = [0]
            "450" = [3]

            [frame]
            fps = 30.0

            [transport]
            listen = "127.0.0.1:7890"
            peer = "127.0.0.1:7891"

            [display]
            driver = "apa102"
            device = "/dev/spidev1.0"
            brightness = 8
            "#,
        )
        .unwrap();
        assert_eq!(settings.frame.fps, 30.0);
        assert_eq!(settings.frame.spin_step, 12);
        assert_eq!(settings.transport.listen.unwrap().port(), 7890);
        assert_eq!(settings.transport.peer.unwrap().port(), 7891);
        assert_eq!(settings.display.driver, DriverKind::Apa102);
        assert_eq!(settings.display.brightness, 8);
        assert_eq!(settings.pixels.angle_table().unwrap().get(3), Some(90.0));
    }

    #[test]
    fn test_missing_pixels_section_fails() {
        assert!(matches!(
            Settings::parse("[frame]\nfps = 60.0\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_non_positive_count_fails() {
        for count in ["0", "-4"] {
            let settings =
                pixels_only(&format!("count = {count}\n[pixels.angles]\n\"0\" = [0]\n\"1\" = [1]\n"))
                    .unwrap();
            assert!(matches!(
                settings.pixels.geometry(),
                Err(ConfigError::Geometry(GeometryError::EmptyStrip))
            ));
        }
    }

    #[test]
    fn test_single_angle_fails() {
        let settings = pixels_only("count = 4\n[pixels.angles]\n\"0\" = [0, 4]\n").unwrap();
        assert!(matches!(
            settings.pixels.geometry(),
            Err(ConfigError::TooFewAngles(1))
        ));
    }

    #[test]
    fn test_duplicate_index_fails() {
        let settings =
            pixels_only("count = 4\n[pixels.angles]\n\"0\" = [0, 4]\n\"90\" = [2, 4]\n").unwrap();
        assert!(matches!(
            settings.pixels.geometry(),
            Err(ConfigError::DuplicateIndex { index: 4, .. })
        ));
    }

    #[test]
    fn test_index_beyond_strip_fails() {
        let settings =
            pixels_only("count = 4\n[pixels.angles]\n\"0\" = [0]\n\"90\" = [9]\n").unwrap();
        assert!(matches!(
            settings.pixels.geometry(),
            Err(ConfigError::IndexBeyondStrip { index: 9, count: 4 })
        ));
    }

    #[test]
    fn test_empty_group_fails() {
        let settings =
            pixels_only("count = 4\n[pixels.angles]\n\"0\" = [0, 4]\n\"90\" = []\n").unwrap();
        assert!(matches!(
            settings.pixels.geometry(),
            Err(ConfigError::EmptyAngleGroup(_))
        ));
    }

    #[test]
    fn test_non_numeric_angle_fails() {
        let settings =
            pixels_only("count = 4\n[pixels.angles]\n\"0\" = [0]\n\"north\" = [4]\n").unwrap();
        assert!(matches!(
            settings.pixels.geometry(),
            Err(ConfigError::InvalidAngle(angle)) if angle == "north"
        ));
    }

    #[test]
    fn test_unbounded_table_fails() {
        let settings =
            pixels_only("count = 10\n[pixels.angles]\n\"0\" = [0]\n\"180\" = [5]\n").unwrap();
        assert!(matches!(
            settings.pixels.geometry(),
            Err(ConfigError::Geometry(GeometryError::Unbounded { index: 9, .. }))
        ));
    }

    #[test]
    fn test_zero_frame_rate_fails() {
        let text = format!("{MINIMAL}\n[frame]\nfps = 0.0\n");
        assert!(matches!(
            Settings::parse(&text),
            Err(ConfigError::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn test_zero_spin_step_fails() {
        let text = format!("{MINIMAL}\n[frame]\nspin_step = 0\n");
        assert!(matches!(
            Settings::parse(&text),
            Err(ConfigError::ZeroSpinStep)
        ));
    }

    #[test]
    fn test_custom_mode_by_scene_or_sprite() {
        let geometry = Settings::parse(MINIMAL).unwrap().pixels.geometry().unwrap();

        assert!(custom_mode(None, None, &geometry).unwrap().is_none());

        let mut mode = custom_mode(Some("snakes"), None, &geometry).unwrap().unwrap();
        assert_eq!(mode.next_scene(), Some(SceneId::Snakes.as_str()));

        let mut mode = custom_mode(None, Some("every_nth"), &geometry)
            .unwrap()
            .unwrap();
        assert_eq!(mode.next_scene(), Some("everyNth"));
    }

    #[test]
    fn test_unknown_names_fail() {
        let geometry = Settings::parse(MINIMAL).unwrap().pixels.geometry().unwrap();
        assert!(matches!(
            custom_mode(Some("disco"), None, &geometry),
            Err(ConfigError::UnknownScene(_))
        ));
        assert!(matches!(
            custom_mode(None, Some("disco"), &geometry),
            Err(ConfigError::UnknownSprite(_))
        ));
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let settings = Settings::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/tree.toml"))
            .unwrap();
        let geometry = settings.pixels.geometry().unwrap();
        assert_eq!(geometry.count(), 450);
    }
}
