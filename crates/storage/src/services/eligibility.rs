use crate::models::{Camel, RaceLoop};

/// A camel may enter a loop only when its age class and sex match exactly.
pub fn is_eligible(camel: &Camel, race_loop: &RaceLoop) -> bool {
    camel.age_class == race_loop.age_class && camel.sex == race_loop.sex
}
