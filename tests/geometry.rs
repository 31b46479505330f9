mod tests {
    use tree_lights::{AngleTable, Geometry, GeometryError};
    use tree_lights::geometry::angular_distance;

    const EPSILON: f32 = 1e-3;

    fn worked_example() -> Geometry {
        let table: AngleTable = [(0, 0.0), (10, 0.0), (5, 180.0)].into_iter().collect();
        Geometry::new(10, table).unwrap()
    }

    /// Two full windings plus a top pixel facing front
    fn two_windings() -> Geometry {
        let table: AngleTable = [(0, 0.0), (5, 180.0), (10, 0.0), (15, 180.0), (20, 0.0)]
            .into_iter()
            .collect();
        Geometry::new(21, table).unwrap()
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_angles_are_exact() {
        let geometry = worked_example();
        assert_eq!(geometry.angle(0), 0.0);
        assert_eq!(geometry.angle(5), 180.0);
    }

    #[test]
    fn test_interpolates_between_references() {
        let geometry = worked_example();
        assert_close(geometry.angle(2), 72.0);
        assert_close(geometry.angle(1), 36.0);
    }

    #[test]
    fn test_interpolation_wraps_through_zero() {
        let geometry = worked_example();
        assert_close(geometry.angle(7), 252.0);
        assert_close(geometry.angle(9), 324.0);
    }

    #[test]
    fn test_angle_is_memoized() {
        let geometry = worked_example();
        let first = geometry.angle(3);
        assert_eq!(geometry.angle(3), first);
        assert_eq!(geometry.try_angle(3), Ok(first));
    }

    #[test]
    fn test_angle_past_end_is_out_of_range() {
        let geometry = worked_example();
        assert_eq!(
            geometry.try_angle(10),
            Err(GeometryError::OutOfRange {
                index: 10,
                count: 10
            })
        );
    }

    #[test]
    fn test_missing_bottom_reference_is_rejected() {
        let table: AngleTable = [(2, 0.0), (9, 180.0)].into_iter().collect();
        assert_eq!(
            Geometry::new(10, table).unwrap_err(),
            GeometryError::Unbounded {
                index: 0,
                first: 2,
                last: 9
            }
        );
    }

    #[test]
    fn test_missing_top_reference_is_rejected() {
        let table: AngleTable = [(0, 0.0), (5, 180.0)].into_iter().collect();
        assert_eq!(
            Geometry::new(10, table).unwrap_err(),
            GeometryError::Unbounded {
                index: 9,
                first: 0,
                last: 5
            }
        );
    }

    #[test]
    fn test_last_pixel_may_be_the_top_reference() {
        let table: AngleTable = [(0, 0.0), (9, 180.0)].into_iter().collect();
        let geometry = Geometry::new(10, table).unwrap();
        assert_eq!(geometry.angle(9), 180.0);
    }

    #[test]
    fn test_empty_strip_is_rejected() {
        let table: AngleTable = [(0, 0.0), (1, 180.0)].into_iter().collect();
        assert_eq!(
            Geometry::new(0, table).unwrap_err(),
            GeometryError::EmptyStrip
        );
    }

    #[test]
    fn test_table_normalizes_angles() {
        let mut table = AngleTable::new();
        table.insert(0, 360.0);
        table.insert(1, -90.0);
        assert_eq!(table.get(0), Some(0.0));
        assert_eq!(table.get(1), Some(270.0));
        assert_eq!(table.insert(1, 45.0), Some(270.0));
    }

    #[test]
    fn test_radius_tapers_to_the_top() {
        let geometry = worked_example();
        assert_close(geometry.radius(0), 1.0);
        assert_close(geometry.radius(5), 0.5);
        assert!(geometry.radius(9) > 0.0);
    }

    #[test]
    fn test_position_projects_angle_and_radius() {
        let geometry = worked_example();
        let (x, y) = geometry.position(0);
        assert_close(x, 1.0);
        assert_close(y, 0.5);

        let (x, y) = geometry.position(5);
        assert_close(x, 0.25);
        assert_close(y, 0.5);
    }

    #[test]
    fn test_angle_from_takes_the_short_way_round() {
        let geometry = worked_example();
        assert_close(geometry.angle_from(0, 350.0), 10.0);
        assert_close(geometry.angle_from(0, 10.0), 10.0);
        assert_close(geometry.angle_from(5, 0.0), 180.0);
        assert_close(angular_distance(90.0, 270.0), 180.0);
    }

    #[test]
    fn test_angle_band_includes_both_sides_of_zero() {
        let geometry = worked_example();
        let band: Vec<usize> = geometry.indices_within_angle_band(0.0, 80.0).collect();
        assert_eq!(band, vec![0, 1, 9]);
    }

    #[test]
    fn test_angle_band_is_restartable() {
        let geometry = worked_example();
        let band = geometry.indices_within_angle_band(180.0, 80.0);
        let first: Vec<usize> = band.clone().collect();
        let second: Vec<usize> = band.collect();
        assert_eq!(first, vec![4, 5, 6]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_near_angle_finds_one_pixel_per_winding() {
        let geometry = two_windings();
        assert_eq!(geometry.indices_near_angle(0.0), vec![0, 10, 20]);
        assert_eq!(geometry.indices_near_angle(180.0), vec![5, 15]);
    }
}
