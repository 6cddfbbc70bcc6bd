use transit_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.len(), 6);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![3, 512, 512], vec![0.0f32; 10]);
    assert_eq!(
        result.unwrap_err(),
        TensorError::ShapeMismatch {
            expected: 3 * 512 * 512,
            got: 10
        }
    );
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_zeros() {
    let tensor = Tensor::<f32>::zeros(vec![2, 3]).unwrap();
    assert_eq!(tensor.data, vec![0.0; 6]);
}

#[test]
fn test_tensor_from_vec_is_rank_one() {
    let tensor = Tensor::from_vec(vec![0.1f32, 0.9, 0.05]);
    assert_eq!(tensor.shape, vec![3]);
    assert_eq!(tensor.ndim(), 1);
}

#[test]
fn test_tensor_from_scalar() {
    let tensor = Tensor::from_scalar(42.0);
    assert_eq!(tensor.shape, Vec::<usize>::new());
    assert_eq!(tensor.ndim(), 0);
    assert_eq!(tensor.data, vec![42.0]);
}

#[test]
fn test_tensor_reshape_keeps_data() {
    let tensor = Tensor::new(vec![1, 4], vec![1.0f32, 2.0, 3.5, 4.25]).unwrap();
    let reshaped = tensor.reshape(vec![4]).unwrap();
    assert_eq!(reshaped.shape, vec![4]);
    assert_eq!(reshaped.data, vec![1.0, 2.0, 3.5, 4.25]);
}

#[test]
fn test_tensor_reshape_rejects_wrong_count() {
    let tensor = Tensor::new(vec![2, 2], vec![0u8; 4]).unwrap();
    assert!(matches!(
        tensor.reshape(vec![5]),
        Err(TensorError::ShapeMismatch { expected: 5, got: 4 })
    ));
}

#[test]
fn test_tensor_is_empty() {
    assert!(Tensor::<f32>::new(vec![0, 37], vec![]).unwrap().is_empty());
    assert!(!Tensor::from_vec(vec![1u8]).is_empty());
}

#[test]
fn test_tensor_debug() {
    let tensor = Tensor::new(vec![2], vec![1u8, 2]).unwrap();
    let debug_str = format!("{:?}", tensor);
    assert!(debug_str.contains("shape"));
    assert!(debug_str.contains("data"));
}
