//! Tests for progress bars over GA runs and archive steps

#[cfg(test)]
mod tests {
    use mapsmith::evolution::genetic::GenerationReport;
    use mapsmith::io::progress::ProgressManager;

    fn report(generation: usize) -> GenerationReport {
        GenerationReport {
            generation,
            best: 80.0,
            elite_floor: 75.0,
            feasible: 9,
        }
    }

    // Tests bars are indexed in creation order
    // Verified by returning the bar count instead of the index
    #[test]
    fn test_start_returns_indices() {
        let mut pm = ProgressManager::new();
        assert_eq!(pm.start("evolve", 10), 0);
        assert_eq!(pm.start("step 1/2", 40), 1);
        pm.finish();
    }

    // Tests a full run of updates and completion
    // Verified by updating bars out of range
    #[test]
    fn test_advance_and_complete() {
        let mut pm = ProgressManager::default();
        let index = pm.start("step 1/1", 8);
        for pressure in 0..4 {
            for generation in 1..=2 {
                pm.advance(index, pressure * 2, &report(generation));
            }
        }
        pm.complete(index, "+1 new, 0 replaced, 1 occupied".to_owned());
        pm.finish();
    }

    // Tests unknown bar indices are ignored
    // Verified by indexing the bar list directly
    #[test]
    fn test_unknown_index_ignored() {
        let pm = ProgressManager::new();
        pm.advance(3, 0, &report(1));
        pm.complete(3, String::new());
        pm.finish();
    }
}
