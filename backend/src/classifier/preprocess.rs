//! Image preprocessing for the leaf disease classifier

use image::imageops::FilterType;
use ndarray::Array4;
use shared::{CLASSIFIER_CHANNELS, CLASSIFIER_INPUT_SHAPE, CLASSIFIER_INPUT_SIZE};

use super::ClassifierError;

/// Decode, resize to 224x224 RGB, scale to `[0, 1]` and add a batch axis.
///
/// The returned tensor always has shape `[1, 224, 224, 3]`.
pub fn preprocess_image(bytes: &[u8]) -> Result<Array4<f32>, ClassifierError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ClassifierError::Decode(e.to_string()))?;

    let size = CLASSIFIER_INPUT_SIZE as u32;
    let rgb = decoded.to_rgb8();
    let resized = image::imageops::resize(&rgb, size, size, FilterType::Triangle);

    let tensor = Array4::from_shape_fn(
        (1, CLASSIFIER_INPUT_SIZE, CLASSIFIER_INPUT_SIZE, CLASSIFIER_CHANNELS),
        |(_, y, x, c)| f32::from(resized.get_pixel(x as u32, y as u32)[c]) / 255.0,
    );

    check_input_shape(tensor.shape())?;
    Ok(tensor)
}

pub fn check_input_shape(shape: &[usize]) -> Result<(), ClassifierError> {
    if shape != CLASSIFIER_INPUT_SHAPE {
        return Err(ClassifierError::InvalidShape(shape.to_vec()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageOutputFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(width, height, Rgb(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_output_shape_for_any_input_size() {
        for (w, h) in [(10, 10), (640, 480), (224, 224), (1, 300)] {
            let tensor = preprocess_image(&png_bytes(w, h, [10, 20, 30])).unwrap();
            assert_eq!(tensor.shape(), &CLASSIFIER_INPUT_SHAPE);
        }
    }

    #[test]
    fn test_values_scaled_to_unit_range() {
        let tensor = preprocess_image(&png_bytes(32, 32, [255, 0, 51])).unwrap();
        assert!((tensor[[0, 100, 100, 0]] - 1.0).abs() < 1e-6);
        assert!(tensor[[0, 100, 100, 1]].abs() < 1e-6);
        assert!((tensor[[0, 100, 100, 2]] - 0.2).abs() < 1e-6);
        assert!(tensor.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = preprocess_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }

    #[test]
    fn test_shape_check() {
        assert!(check_input_shape(&[1, 224, 224, 3]).is_ok());
        assert!(matches!(
            check_input_shape(&[1, 3, 224, 224]),
            Err(ClassifierError::InvalidShape(_))
        ));
    }
}
