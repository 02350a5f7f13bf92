use crate::session::DrillError;

/// Ordered question/answer pairs. `answers[i]` always answers `questions[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<String>,
    answers: Vec<String>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, i: usize) -> Result<&str, DrillError> {
        self.questions
            .get(i)
            .map(String::as_str)
            .ok_or(DrillError::IndexOutOfRange {
                index: i,
                count: self.count(),
            })
    }

    pub fn answer(&self, i: usize) -> Result<&str, DrillError> {
        self.answers
            .get(i)
            .map(String::as_str)
            .ok_or(DrillError::IndexOutOfRange {
                index: i,
                count: self.count(),
            })
    }

    pub fn add_entry(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.questions.push(question.into());
        self.answers.push(answer.into());
    }

    /// Appends every pair of `others`, in argument order.
    pub fn concatenate<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a QuestionBank>,
    {
        for other in others {
            if other.is_empty() {
                continue;
            }
            self.questions.extend(other.questions.iter().cloned());
            self.answers.extend(other.answers.iter().cloned());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(prefix: &str, n: usize) -> QuestionBank {
        let mut bank = QuestionBank::new();
        for i in 0..n {
            bank.add_entry(format!("{prefix}_Q{i}"), format!("{prefix}_A{i}"));
        }
        bank
    }

    #[test]
    fn test_add_entry_keeps_pairs_aligned() {
        let mut bank = QuestionBank::new();
        bank.add_entry("bonjour", "hello");
        bank.add_entry("merci", "thanks");
        assert_eq!(bank.count(), 2);
        assert_eq!(bank.question(1).unwrap(), "merci");
        assert_eq!(bank.answer(1).unwrap(), "thanks");
    }

    #[test]
    fn test_out_of_range_lookup_fails() {
        let bank = bank("x", 2);
        assert!(matches!(
            bank.question(2),
            Err(DrillError::IndexOutOfRange { index: 2, count: 2 })
        ));
        assert!(bank.answer(5).is_err());
        assert!(QuestionBank::new().question(0).is_err());
    }

    #[test]
    fn test_concatenate_preserves_order_and_offsets() {
        let a = bank("a", 2);
        let b = bank("b", 3);
        let mut merged = QuestionBank::new();
        merged.concatenate([&a, &b]);

        assert_eq!(merged.count(), a.count() + b.count());
        for i in 0..a.count() {
            assert_eq!(merged.question(i).unwrap(), a.question(i).unwrap());
        }
        for i in a.count()..merged.count() {
            assert_eq!(
                merged.question(i).unwrap(),
                b.question(i - a.count()).unwrap()
            );
            assert_eq!(merged.answer(i).unwrap(), b.answer(i - a.count()).unwrap());
        }
    }

    #[test]
    fn test_concatenate_skips_empty_banks() {
        let empty = QuestionBank::new();
        let mut merged = bank("a", 1);
        merged.concatenate([&empty, &bank("b", 1), &empty]);
        assert_eq!(merged.count(), 2);
        assert_eq!(merged.question(1).unwrap(), "b_Q0");
    }

    #[test]
    fn test_iter_yields_pairs() {
        let bank = bank("t", 2);
        let pairs: Vec<(&str, &str)> = bank.iter().collect();
        assert_eq!(pairs, vec![("t_Q0", "t_A0"), ("t_Q1", "t_A1")]);
    }
}
