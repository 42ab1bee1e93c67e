//! Burn models for handwritten digit classification.
//!
//! `DigitNet` is a pure Burn Module with no awareness of the `Classifier` trait; the
//! `inference` crate wraps it into a classifier for runtime use.
//!
//! Topology (NCHW, batch `B`):
//! ```text
//! [B,1,28,28] -> conv kxk same -> relu -> maxpool 2x2 -> [B,c1,14,14]
//!             -> conv kxk same -> relu -> maxpool 3x3 -> [B,c2,4,4]
//!             -> flatten -> linear -> [B,10]
//! ```

use burn::module::Module;
use burn::nn;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

pub const NUM_CLASSES: usize = 10;
/// Spatial side after both pooling stages (28 -> 14 -> 4).
const POOLED_SIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitNetConfig {
    pub conv1_channels: usize,
    pub conv2_channels: usize,
    pub kernel_size: usize,
}

impl Default for DigitNetConfig {
    fn default() -> Self {
        Self {
            conv1_channels: 8,
            conv2_channels: 16,
            kernel_size: 5,
        }
    }
}

impl DigitNetConfig {
    /// Width of the flattened feature vector fed to the head.
    pub fn flat_features(&self) -> usize {
        self.conv2_channels * POOLED_SIDE * POOLED_SIDE
    }

    /// Parameter shapes a `DigitNet` built from this config must have, keyed by
    /// parameter name in the same order as [`DigitNet::param_shapes`].
    pub fn expected_param_shapes(&self) -> Vec<(&'static str, Vec<usize>)> {
        let k = self.kernel_size;
        vec![
            ("conv1.weight", vec![self.conv1_channels, 1, k, k]),
            ("conv1.bias", vec![self.conv1_channels]),
            (
                "conv2.weight",
                vec![self.conv2_channels, self.conv1_channels, k, k],
            ),
            ("conv2.bias", vec![self.conv2_channels]),
            ("head.weight", vec![self.flat_features(), NUM_CLASSES]),
            ("head.bias", vec![NUM_CLASSES]),
        ]
    }
}

#[derive(Debug, Module)]
pub struct DigitNet<B: Backend> {
    conv1: Conv2d<B>,
    pool1: MaxPool2d,
    conv2: Conv2d<B>,
    pool2: MaxPool2d,
    head: nn::Linear<B>,
}

impl<B: Backend> DigitNet<B> {
    pub fn new(cfg: DigitNetConfig, device: &B::Device) -> Self {
        let kernel = [cfg.kernel_size, cfg.kernel_size];
        let conv1 = Conv2dConfig::new([1, cfg.conv1_channels], kernel)
            .with_padding(nn::PaddingConfig2d::Same)
            .init(device);
        let conv2 = Conv2dConfig::new([cfg.conv1_channels, cfg.conv2_channels], kernel)
            .with_padding(nn::PaddingConfig2d::Same)
            .init(device);
        let pool1 = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let pool2 = MaxPool2dConfig::new([3, 3]).with_strides([3, 3]).init();
        let head = nn::LinearConfig::new(cfg.flat_features(), NUM_CLASSES).init(device);
        Self {
            conv1,
            pool1,
            conv2,
            pool2,
            head,
        }
    }

    /// `[B,1,28,28]` images to `[B,10]` raw logits.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool1.forward(relu(self.conv1.forward(input)));
        let x = self.pool2.forward(relu(self.conv2.forward(x)));
        let [batch, channels, height, width] = x.dims();
        let x = x.reshape([batch, channels * height * width]);
        self.head.forward(x)
    }

    /// Actual parameter shapes, e.g. after loading a record from disk.
    pub fn param_shapes(&self) -> Vec<(&'static str, Vec<usize>)> {
        let bias_shape = |bias: &Option<burn::module::Param<Tensor<B, 1>>>| {
            bias.as_ref()
                .map(|b| b.val().dims().to_vec())
                .unwrap_or_default()
        };
        vec![
            ("conv1.weight", self.conv1.weight.val().dims().to_vec()),
            ("conv1.bias", bias_shape(&self.conv1.bias)),
            ("conv2.weight", self.conv2.weight.val().dims().to_vec()),
            ("conv2.bias", bias_shape(&self.conv2.bias)),
            ("head.weight", self.head.weight.val().dims().to_vec()),
            ("head.bias", bias_shape(&self.head.bias)),
        ]
    }
}

pub mod prelude {
    pub use super::{DigitNet, DigitNetConfig};
}
