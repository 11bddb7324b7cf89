/// Counts the positions where the submitted option index equals the correct
/// one. Unanswered, surplus and out-of-range answers never score.
pub fn tally(correct: &[i32], answers: &[Option<i32>]) -> i32 {
    correct
        .iter()
        .zip(answers.iter())
        .filter(|(want, got)| **got == Some(**want))
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_index_equal_positions() {
        let correct = [2, 0, 1, 3];
        assert_eq!(tally(&correct, &[Some(2), Some(0), Some(1), Some(3)]), 4);
        assert_eq!(tally(&correct, &[Some(2), Some(1), Some(1), Some(0)]), 2);
        assert_eq!(tally(&correct, &[Some(0), Some(1), Some(2), Some(0)]), 0);
    }

    #[test]
    fn test_short_and_unanswered_submissions() {
        let correct = [1, 1, 1];
        assert_eq!(tally(&correct, &[]), 0);
        assert_eq!(tally(&correct, &[Some(1)]), 1);
        assert_eq!(tally(&correct, &[None, Some(1), None]), 1);
    }

    #[test]
    fn test_surplus_answers_are_ignored() {
        assert_eq!(tally(&[0], &[Some(0), Some(0), Some(0)]), 1);
    }

    #[test]
    fn test_no_negative_marking() {
        assert_eq!(tally(&[3, 3], &[Some(-1), Some(9)]), 0);
    }
}
