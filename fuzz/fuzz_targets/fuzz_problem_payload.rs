#![no_main]

use libfuzzer_sys::fuzz_target;
use tsp_tour_collector::{ProblemPayload, TourBuilder, TourRules};

fuzz_target!(|data: &[u8]| {
    // Nur gültiges UTF-8 testen (Response-Bodies sind Text)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(payload) = ProblemPayload::parse(s) {
            let mut builder = TourBuilder::new(TourRules::colored());
            let _ = builder.load(payload.into_problem());
        }
    }
});
