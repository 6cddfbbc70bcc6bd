use transit_image::{ImageError, PixelFormat, Plane, RawFrame, Rotation};

#[test]
fn test_rotation_from_degrees() {
    assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Deg0);
    assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::Deg90);
    assert_eq!(Rotation::from_degrees(180).unwrap(), Rotation::Deg180);
    assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::Deg270);
    assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
    assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
}

#[test]
fn test_rotation_rejects_non_quadrant() {
    assert!(matches!(
        Rotation::from_degrees(45),
        Err(ImageError::InvalidRotation(45))
    ));
}

#[test]
fn test_rotation_swaps_axes() {
    assert!(Rotation::Deg90.swaps_axes());
    assert!(Rotation::Deg270.swaps_axes());
    assert!(!Rotation::Deg180.swaps_axes());
    assert_eq!(Rotation::Deg270.degrees(), 270);
}

#[test]
fn test_i420_len_rounds_chroma_up() {
    assert_eq!(RawFrame::i420_len(4, 4), 16 + 2 * 4);
    assert_eq!(RawFrame::i420_len(3, 3), 9 + 2 * 4);
}

#[test]
fn test_from_i420_splits_planes() {
    let mut data = vec![10u8; 16];
    data.extend(vec![20u8; 4]);
    data.extend(vec![30u8; 4]);
    let frame = RawFrame::from_i420(4, 4, Rotation::Deg90, &data).unwrap();

    assert_eq!(frame.format, PixelFormat::Yuv420);
    assert_eq!(frame.rotation, Rotation::Deg90);
    assert_eq!(frame.planes.len(), 3);
    assert_eq!(frame.planes[0].data, vec![10u8; 16]);
    assert_eq!(frame.planes[1].data, vec![20u8; 4]);
    assert_eq!(frame.planes[2].data, vec![30u8; 4]);
    assert_eq!(frame.planes[1].row_stride, 2);
    frame.validate().unwrap();
}

#[test]
fn test_from_i420_short_buffer() {
    let result = RawFrame::from_i420(4, 4, Rotation::Deg0, &[0u8; 20]);
    assert!(matches!(result, Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_validate_rejects_missing_plane() {
    let frame = RawFrame::new(
        2,
        2,
        PixelFormat::Yuv420,
        Rotation::Deg0,
        vec![Plane::new(vec![0; 4], 2, 1), Plane::new(vec![0; 1], 1, 1)],
    );
    assert!(matches!(frame.validate(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_validate_rejects_short_chroma_plane() {
    let frame = RawFrame::new(
        4,
        4,
        PixelFormat::Yuv420,
        Rotation::Deg0,
        vec![
            Plane::new(vec![0; 16], 4, 1),
            Plane::new(vec![0; 4], 2, 1),
            Plane::new(vec![0; 3], 2, 1),
        ],
    );
    let err = frame.validate().unwrap_err();
    assert!(err.to_string().contains("plane 2"));
}

#[test]
fn test_validate_accepts_padded_rows() {
    // row stride larger than width, as camera HALs commonly deliver
    let frame = RawFrame::new(
        4,
        2,
        PixelFormat::Yuv420,
        Rotation::Deg0,
        vec![
            Plane::new(vec![0; 8 + 4], 8, 1),
            Plane::new(vec![0; 2], 8, 1),
            Plane::new(vec![0; 2], 8, 1),
        ],
    );
    frame.validate().unwrap();
}

#[test]
fn test_validate_rejects_empty_frame() {
    let frame = RawFrame::new(0, 4, PixelFormat::Yuv420, Rotation::Deg0, vec![]);
    assert!(matches!(frame.validate(), Err(ImageError::InvalidFrame(_))));
}
