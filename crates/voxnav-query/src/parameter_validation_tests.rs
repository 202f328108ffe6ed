//! Invalid parameter handling for baking and path queries

#[cfg(test)]
mod tests {
    use crate::{NavGridQuery, NavMesh3d, Status, DEFAULT_MAX_CORNERS};
    use glam::Vec3;
    use voxnav::{grid_header_to_bytes, BakeConfig, OpenSpace, GRID_HEADER_SIZE};
    use voxnav_common::Error;

    #[test]
    fn test_bake_rejects_invalid_parameters() {
        let mut nav = NavMesh3d::new();
        let invalid = [
            BakeConfig::new(Vec3::splat(4.0), Vec3::ZERO, 0.0),
            BakeConfig::new(Vec3::splat(4.0), Vec3::ZERO, -1.0),
            BakeConfig::new(Vec3::new(4.0, 0.0, 4.0), Vec3::ZERO, 1.0),
            BakeConfig::new(Vec3::new(-4.0, 4.0, 4.0), Vec3::ZERO, 1.0),
            BakeConfig::new(Vec3::splat(4.0), Vec3::ZERO, f32::NAN),
            BakeConfig::new(Vec3::new(4.0, f32::NAN, 4.0), Vec3::ZERO, 1.0),
        ];
        for config in invalid {
            assert!(
                matches!(nav.bake(config, &OpenSpace), Err(Error::InvalidParameter(_))),
                "{:?} should be rejected",
                config
            );
        }
        assert!(!nav.is_baked());
    }

    #[test]
    fn test_bake_overloads() {
        let mut nav = NavMesh3d::new();
        nav.bake_centered(Vec3::splat(6.0), 1.0, &OpenSpace).unwrap();
        let config = *nav.bake_config().unwrap();
        assert_eq!(config.origin, Vec3::splat(-3.0));
        assert_eq!(config.cell_size, 1.0);

        nav.bake_centered(Vec3::new(4.0, 2.0, 4.0), 0.5, &OpenSpace)
            .unwrap();
        assert_eq!(nav.grid().unwrap().dims(), [8, 4, 8]);
        assert_eq!(nav.bake_config().unwrap().origin, Vec3::new(-2.0, -1.0, -2.0));
    }

    #[test]
    fn test_max_corners_setter() {
        let mut nav = NavMesh3d::new();
        assert_eq!(nav.max_corners(), DEFAULT_MAX_CORNERS);
        nav.set_max_corners(0);
        assert_eq!(nav.max_corners(), DEFAULT_MAX_CORNERS);
        nav.set_max_corners(12);
        assert_eq!(nav.max_corners(), 12);

        assert_eq!(
            NavGridQuery::with_max_corners(0).err(),
            Some(Status::InvalidParam)
        );
    }

    #[test]
    fn test_header_rejections() {
        let mut nav = NavMesh3d::new();
        let data = grid_header_to_bytes(&BakeConfig::default()).unwrap();

        assert!(matches!(
            nav.load_header(&data[..GRID_HEADER_SIZE - 1], &OpenSpace),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            nav.load_header(&[], &OpenSpace),
            Err(Error::Serialization(_))
        ));

        let bad = grid_header_to_bytes(&BakeConfig::new(Vec3::ONE, Vec3::ZERO, 0.0)).unwrap();
        assert!(matches!(
            nav.load_header(&bad, &OpenSpace),
            Err(Error::InvalidParameter(_))
        ));
        assert!(!nav.is_baked());

        nav.load_header(&data, &OpenSpace).unwrap();
        assert_eq!(nav.cell_count(), 1000);
    }

    #[test]
    fn test_header_file_rebake() {
        use tempfile::NamedTempFile;

        let mut nav = NavMesh3d::new();
        nav.bake_centered(Vec3::new(6.0, 2.0, 6.0), 0.5, &OpenSpace)
            .unwrap();
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), nav.save_header().unwrap()).unwrap();

        let mut loaded = NavMesh3d::new();
        let data = std::fs::read(file.path()).unwrap();
        loaded.load_header(&data, &OpenSpace).unwrap();
        assert_eq!(loaded.bake_config(), nav.bake_config());
        assert_eq!(loaded.cell_count(), 12 * 4 * 12);
    }

    #[test]
    fn test_query_status_converts_to_error() {
        fn run(nav: &mut NavMesh3d) -> voxnav_common::Result<usize> {
            let path = nav.get_path(Vec3::ZERO, Vec3::splat(100.0))?;
            Ok(path.len())
        }

        let mut nav = NavMesh3d::new();
        nav.bake_centered(Vec3::splat(4.0), 1.0, &OpenSpace).unwrap();
        assert!(matches!(run(&mut nav), Err(Error::OutOfBounds(_))));
    }

    #[test]
    fn test_grid_smaller_than_one_cell() {
        let mut nav = NavMesh3d::new();
        nav.bake(BakeConfig::new(Vec3::splat(0.5), Vec3::ZERO, 1.0), &OpenSpace)
            .unwrap();
        assert_eq!(nav.cell_count(), 0);
        assert_eq!(
            nav.get_path(Vec3::ZERO, Vec3::ZERO),
            Err(Status::OutOfBounds)
        );
    }
}
