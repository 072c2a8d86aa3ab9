//! Local two-class sequence classifier.
//!
//! Used only when no evidence at all was found online. The model is a
//! fine-tuned BERT-style classifier exported to ONNX next to its
//! `tokenizer.json`; class index 1 means Real and class index 0 means Fake.

use crate::error::ClassifierError;
use crate::models::VerdictLabel;
use crate::settings::Settings;
use tracing::{info, warn};

use super::Capability;

/// Anything that maps a piece of text to two class logits.
pub trait SequenceClassifier {
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError>;
}

impl<T: SequenceClassifier + ?Sized> SequenceClassifier for Box<T> {
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        (**self).logits(text)
    }
}

/// Argmax over exactly two logits, with the softmax probability of the winner.
///
/// Ties go to index 0.
pub fn label_from_logits(logits: &[f32]) -> Result<(VerdictLabel, f32), ClassifierError> {
    let [fake, real] = logits else {
        return Err(ClassifierError::LogitShape(logits.len()));
    };
    let (label, winner, loser) = if real > fake {
        (VerdictLabel::Real, *real, *fake)
    } else {
        (VerdictLabel::Fake, *fake, *real)
    };
    let confidence = 1.0 / (1.0 + (loser - winner).exp());
    Ok((label, confidence))
}

/// Load the configured classifier, recording why it is unavailable on failure.
pub fn load(settings: &Settings) -> Capability<Box<dyn SequenceClassifier>> {
    match load_boxed(settings) {
        Ok(classifier) => {
            info!(model_dir = %settings.model_dir.display(), "Local classifier loaded");
            Capability::Ready(classifier)
        }
        Err(e) => {
            warn!(model_dir = %settings.model_dir.display(), error = %e, "Local classifier unavailable");
            Capability::Unavailable(e.to_string())
        }
    }
}

#[cfg(feature = "onnx")]
fn load_boxed(settings: &Settings) -> Result<Box<dyn SequenceClassifier>, ClassifierError> {
    let classifier = onnx::OnnxClassifier::load(
        &settings.model_dir,
        settings.max_sequence_length,
        settings.use_token_type_ids,
    )?;
    Ok(Box::new(classifier))
}

#[cfg(not(feature = "onnx"))]
fn load_boxed(_settings: &Settings) -> Result<Box<dyn SequenceClassifier>, ClassifierError> {
    Err(ClassifierError::NotCompiled)
}

#[cfg(feature = "onnx")]
mod onnx {
    use super::SequenceClassifier;
    use crate::error::ClassifierError;
    use ndarray::Array2;
    use ort::session::Session;
    use ort::value::Tensor;
    use std::path::Path;
    use std::sync::Mutex;
    use tokenizers::{Tokenizer, TruncationParams};
    use tracing::debug;

    const MODEL_FILENAME: &str = "model.onnx";
    const TOKENIZER_FILENAME: &str = "tokenizer.json";

    /// ONNX Runtime session plus the tokenizer it was trained with.
    pub struct OnnxClassifier {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        use_token_type_ids: bool,
    }

    impl OnnxClassifier {
        pub fn load(dir: &Path, max_length: usize, use_token_type_ids: bool) -> Result<Self, ClassifierError> {
            let model_path = dir.join(MODEL_FILENAME);
            let tokenizer_path = dir.join(TOKENIZER_FILENAME);
            for path in [&model_path, &tokenizer_path] {
                if !path.exists() {
                    return Err(ClassifierError::MissingArtifact(path.display().to_string()));
                }
            }

            let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| ClassifierError::Tokenizer(e.to_string()))?;
            tokenizer
                .with_truncation(Some(TruncationParams {
                    max_length,
                    ..Default::default()
                }))
                .map_err(|e| ClassifierError::Tokenizer(e.to_string()))?;

            let session = Session::builder()
                .and_then(|b| b.with_intra_threads(1))
                .and_then(|b| b.commit_from_file(&model_path))
                .map_err(|e| ClassifierError::Inference(format!("Failed to load ONNX model: {e}")))?;

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
                use_token_type_ids,
            })
        }
    }

    fn to_tensor(values: &[u32]) -> Result<Tensor<i64>, ClassifierError> {
        let row: Vec<i64> = values.iter().map(|&v| i64::from(v)).collect();
        let array = Array2::from_shape_vec((1, row.len()), row)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        Tensor::from_array(array).map_err(|e| ClassifierError::Inference(e.to_string()))
    }

    impl SequenceClassifier for OnnxClassifier {
        fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| ClassifierError::Tokenizer(e.to_string()))?;
            debug!(tokens = encoding.get_ids().len(), "Tokenized query");

            let input_ids = to_tensor(encoding.get_ids())?;
            let attention_mask = to_tensor(encoding.get_attention_mask())?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| ClassifierError::Inference("classifier session poisoned".to_string()))?;

            let outputs = if self.use_token_type_ids {
                let token_type_ids = to_tensor(encoding.get_type_ids())?;
                session.run(ort::inputs![
                    "input_ids" => input_ids,
                    "attention_mask" => attention_mask,
                    "token_type_ids" => token_type_ids
                ])
            } else {
                session.run(ort::inputs![
                    "input_ids" => input_ids,
                    "attention_mask" => attention_mask
                ])
            }
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ClassifierError::Inference(format!("Failed to extract logits: {e}")))?;
            Ok(data.to_vec())
        }
    }
}

#[cfg(test)]
pub mod tests_support {
    use super::*;

    /// Classifier that always answers with the same logits.
    #[derive(Debug, Clone)]
    pub struct FixedLogits(pub Vec<f32>);

    impl SequenceClassifier for FixedLogits {
        fn logits(&self, _text: &str) -> Result<Vec<f32>, ClassifierError> {
            Ok(self.0.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::FixedLogits;
    use super::*;

    #[test]
    fn test_index_one_is_real() {
        let logits = FixedLogits(vec![0.1, 0.9]).logits("headline").unwrap();
        let (label, confidence) = label_from_logits(&logits).unwrap();
        assert_eq!(label, VerdictLabel::Real);
        assert!(confidence > 0.5 && confidence < 1.0);
    }

    #[test]
    fn test_index_zero_is_fake() {
        let (label, _) = label_from_logits(&[0.9, 0.1]).unwrap();
        assert_eq!(label, VerdictLabel::Fake);
    }

    #[test]
    fn test_tie_goes_to_fake() {
        let (label, confidence) = label_from_logits(&[0.3, 0.3]).unwrap();
        assert_eq!(label, VerdictLabel::Fake);
        assert!((confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_logit_count() {
        assert!(matches!(
            label_from_logits(&[0.1, 0.2, 0.7]),
            Err(ClassifierError::LogitShape(3))
        ));
        assert!(matches!(label_from_logits(&[]), Err(ClassifierError::LogitShape(0))));
    }

    #[test]
    fn test_boxed_classifier_delegates() {
        let boxed: Box<dyn SequenceClassifier> = Box::new(FixedLogits(vec![2.0, -1.0]));
        assert_eq!(boxed.logits("x").unwrap(), vec![2.0, -1.0]);
    }

    #[test]
    fn test_missing_model_dir_is_unavailable() {
        let settings = Settings {
            model_dir: std::path::PathBuf::from("/nonexistent/fact_or_fake/model"),
            ..Settings::default()
        };
        assert!(matches!(load(&settings), Capability::Unavailable(_)));
    }
}
