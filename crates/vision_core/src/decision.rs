use crate::interfaces::{LogitVector, PredictedClass, Prediction, ProbabilityVector, NUM_CLASSES};

/// Max-subtracted softmax over the logits.
pub fn softmax(logits: &LogitVector) -> ProbabilityVector {
    let max = logits
        .0
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let mut exps = [0f32; NUM_CLASSES];
    let mut sum = 0.0f32;
    for (e, &l) in exps.iter_mut().zip(logits.0.iter()) {
        *e = (l - max).exp();
        sum += *e;
    }
    for e in exps.iter_mut() {
        *e /= sum;
    }
    ProbabilityVector(exps)
}

/// First index holding the maximum value.
pub fn argmax(values: &[f32; NUM_CLASSES]) -> PredictedClass {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    PredictedClass(best)
}

/// Turn raw logits into a probability distribution and a predicted digit.
pub fn decide(logits: &LogitVector) -> Prediction {
    let probabilities = softmax(logits);
    let class = argmax(&probabilities.0);
    Prediction {
        class,
        probabilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(p: &ProbabilityVector) -> f32 {
        p.0.iter().sum()
    }

    #[test]
    fn probabilities_are_normalized() {
        let logits = LogitVector([-3.2, 0.1, 7.5, 2.0, -0.4, 1.1, 0.0, -8.0, 4.4, 3.3]);
        let p = softmax(&logits);
        assert!(p.0.iter().all(|v| *v >= 0.0));
        assert!((sum(&p) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn shift_invariant() {
        let base = [1.0, 2.0, 0.5, -1.0, 3.0, 0.0, 0.25, -2.0, 1.5, 2.5];
        let shifted = base.map(|v| v + 250.0);
        let a = softmax(&LogitVector(base));
        let b = softmax(&LogitVector(shifted));
        for (x, y) in a.0.iter().zip(b.0.iter()) {
            assert!((x - y).abs() < 1e-6, "{x} vs {y}");
        }
    }

    #[test]
    fn large_logits_do_not_overflow() {
        let mut logits = [1000.0f32; NUM_CLASSES];
        logits[7] = 1010.0;
        let prediction = decide(&LogitVector(logits));
        assert!(prediction.probabilities.0.iter().all(|v| v.is_finite()));
        assert_eq!(prediction.class.index(), 7);
        assert!((sum(&prediction.probabilities) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let prediction = decide(&LogitVector([0.0; NUM_CLASSES]));
        assert_eq!(prediction.class.index(), 0);
        assert!((prediction.confidence() - 0.1).abs() < 1e-6);

        let mut logits = [0.0f32; NUM_CLASSES];
        logits[3] = 5.0;
        logits[8] = 5.0;
        assert_eq!(decide(&LogitVector(logits)).class.index(), 3);
    }
}
