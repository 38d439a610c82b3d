//! Pipeline builder
//!
//! Checks, once, that the engine fits the pipeline: every antecedent must be
//! a vital the pipeline can feed, and the consequent must score within the
//! risk range the severity bands are defined over.

use alloc::{format, sync::Arc};

use crate::{
    constants::fuzzy::{RISK_SCORE_MAX, RISK_SCORE_MIN},
    errors::{AssessmentError, AssessmentResult},
    fuzzy::FuzzyInferenceEngine,
    signal::SignalProcessor,
    thresholds::ThresholdClassifier,
    time::TimeSource,
    traits::AlertSink,
    vitals::Vital,
};

use super::RiskAssessmentPipeline;

/// Builder for [`RiskAssessmentPipeline`]
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    engine: Arc<FuzzyInferenceEngine>,
    classifier: ThresholdClassifier,
    processor: SignalProcessor,
}

impl PipelineBuilder {
    pub(super) fn new(engine: Arc<FuzzyInferenceEngine>) -> Self {
        Self {
            engine,
            classifier: ThresholdClassifier::default(),
            processor: SignalProcessor::default(),
        }
    }

    /// Replace the default threshold classifier
    pub fn classifier(mut self, classifier: ThresholdClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the default signal processor
    pub fn signal_processor(mut self, processor: SignalProcessor) -> Self {
        self.processor = processor;
        self
    }

    /// Attach collaborators and validate the engine
    pub fn build<S, T>(self, sink: S, clock: T) -> AssessmentResult<RiskAssessmentPipeline<S, T>>
    where
        S: AlertSink,
        T: TimeSource,
    {
        for variable in self.engine.antecedents() {
            if Vital::from_name(variable.name()).is_none() {
                return Err(AssessmentError::config(format!(
                    "engine '{}' antecedent '{}' is not a vital sign",
                    self.engine.name(),
                    variable.name()
                )));
            }
        }

        let universe = self.engine.consequent().universe();
        if universe.min() < RISK_SCORE_MIN || universe.max() > RISK_SCORE_MAX {
            return Err(AssessmentError::config(format!(
                "engine '{}' scores over [{}, {}], outside the risk range [{RISK_SCORE_MIN}, {RISK_SCORE_MAX}]",
                self.engine.name(),
                universe.min(),
                universe.max()
            )));
        }

        log_info!(
            "risk pipeline ready: engine '{}' over {} vitals, {} rules",
            self.engine.name(),
            self.engine.antecedents().len(),
            self.engine.rules().len()
        );

        Ok(RiskAssessmentPipeline {
            engine: self.engine,
            classifier: self.classifier,
            processor: self.processor,
            sink,
            clock,
        })
    }
}
