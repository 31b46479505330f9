mod tests {
    use tree_lights::color::Rgb;
    use tree_lights::driver::{Apa102Driver, DisplayError, NullDriver, TerminalDriver};
    use tree_lights::{AngleTable, Geometry, OutputDriver};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

    fn geometry() -> Geometry {
        let table: AngleTable = [(0, 0.0), (4, 180.0), (8, 0.0)].into_iter().collect();
        Geometry::new(8, table).unwrap()
    }

    #[test]
    fn test_apa102_frame_layout() {
        let mut driver = Apa102Driver::new(Vec::new(), 31);
        driver.write(&[RED, GREEN]).unwrap();
        let bytes = driver.into_inner().unwrap();
        assert_eq!(
            bytes,
            vec![
                0x00, 0x00, 0x00, 0x00, // start
                0xFF, 0x00, 0x00, 0xFF, // red
                0xFF, 0x00, 0xFF, 0x00, // green
                0xFF, // end
            ]
        );
    }

    #[test]
    fn test_apa102_clamps_brightness() {
        let mut driver = Apa102Driver::new(Vec::new(), 200);
        assert_eq!(driver.brightness(), 31);
        let frame = driver.encode(&[RED]);
        assert_eq!(frame[4], 0xFF);

        let mut driver = Apa102Driver::new(Vec::new(), 3);
        assert_eq!(driver.encode(&[RED])[4], 0xE3);
    }

    #[test]
    fn test_apa102_end_frame_grows_with_the_strip() {
        let mut driver = Apa102Driver::new(Vec::new(), 31);
        let len = driver.encode(&[RED; 33]).len();
        assert_eq!(len, 4 + 33 * 4 + 3);
    }

    #[test]
    fn test_apa102_write_sends_the_encoded_frame() {
        let mut driver = Apa102Driver::new(Vec::new(), 31);
        driver.write(&[RED, RED]).unwrap();
        let expected = Apa102Driver::new(Vec::new(), 31).encode(&[RED, RED]).to_vec();
        assert_eq!(driver.into_inner(), Some(expected));
    }

    #[test]
    fn test_apa102_close_blanks_and_refuses_writes() {
        let mut driver = Apa102Driver::new(Vec::new(), 31);
        driver.write(&[RED]).unwrap();
        driver.close().unwrap();
        assert!(matches!(driver.write(&[RED]), Err(DisplayError::Closed)));
        assert!(driver.into_inner().is_none());
    }

    #[test]
    fn test_terminal_plots_lit_pixels() {
        let geometry = geometry();
        let mut driver = TerminalDriver::new(Vec::new(), &geometry, 9);
        let mut colors = vec![Rgb::default(); geometry.count()];
        colors[0] = RED;
        driver.write(&colors).unwrap();

        let out = String::from_utf8(driver.into_inner()).unwrap();
        assert!(out.starts_with("\x1b[2J\x1b[H"));
        assert!(out.contains("\x1b[38;2;255;0;0m"));
        assert_eq!(out.lines().count(), 9);
    }

    #[test]
    fn test_terminal_clears_screen_only_once() {
        let geometry = geometry();
        let mut driver = TerminalDriver::new(Vec::new(), &geometry, 5);
        let colors = vec![Rgb::default(); geometry.count()];
        driver.write(&colors).unwrap();
        driver.write(&colors).unwrap();
        let out = String::from_utf8(driver.into_inner()).unwrap();
        assert_eq!(out.matches("\x1b[2J").count(), 1);
        assert_eq!(out.matches("\x1b[H").count(), 2);
    }

    #[test]
    fn test_null_driver_accepts_anything() {
        let mut driver = NullDriver;
        assert!(driver.write(&[RED; 3]).is_ok());
        assert!(driver.close().is_ok());
    }
}
