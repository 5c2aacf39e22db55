#![no_main]

use libfuzzer_sys::fuzz_target;
use psychometric::data::Dataset;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(dataset) = Dataset::parse(text) {
        assert_eq!(dataset.positions().len(), dataset.responses().len());
        assert!(dataset.positions().iter().all(|x| x.is_finite()));

        // The objective must stay finite for any parsed dataset.
        let nll = dataset.objective().evaluate(0.5, 0.5);
        assert!(nll.is_finite());
        assert!(nll >= 0.0);
    }
});
