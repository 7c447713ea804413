use image::{imageops::FilterType, DynamicImage};
use ndarray::{Array1, Array2};

use super::Predictor;

/// A linear classifier over flattened normalized RGB pixels.
///
/// Images are resized to a fixed square edge, scaled to `[0, 1]`, and scored
/// as `weights . x + bias`; the label with the highest score wins.
#[derive(Debug)]
pub struct LinearClassifier {
    /// Class labels, in score order
    labels: Vec<String>,
    /// Weight matrix, one row per label
    weights: Array2<f32>,
    /// Per-label bias terms
    bias: Array1<f32>,
    /// Square input edge length in pixels
    edge: u32,
}

impl LinearClassifier {
    pub(crate) fn new(
        labels: Vec<String>,
        edge: u32,
        weights: Array2<f32>,
        bias: Array1<f32>,
    ) -> Self {
        Self {
            labels,
            weights,
            bias,
            edge,
        }
    }

    /// Runs the forward pass and returns the winning label.
    pub fn predict(&self, image: &DynamicImage) -> String {
        let x = self.features(image);
        let scores = self.weights.dot(&x) + &self.bias;

        // Argmax over class scores; the first maximum wins on ties
        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }
        self.labels[best].clone()
    }

    /// Class labels this classifier scores against.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Resizes and normalizes the image into the model's input vector.
    fn features(&self, image: &DynamicImage) -> Array1<f32> {
        let resized = image.resize_exact(self.edge, self.edge, FilterType::Triangle);
        let rgb = resized.to_rgb8();
        let pixels: Vec<f32> = rgb.as_raw().iter().map(|&p| p as f32 / 255.0).collect();
        Array1::from(pixels)
    }
}

impl Predictor for LinearClassifier {
    fn predict(&self, image: &DynamicImage) -> String {
        LinearClassifier::predict(self, image)
    }

    fn labels(&self) -> &[String] {
        LinearClassifier::labels(self)
    }
}
