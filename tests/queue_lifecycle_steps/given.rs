//! Given steps for queue lifecycle BDD scenarios.

use super::world::QueueWorld;
use rstest_bdd_macros::given;

#[given("an empty in-memory queue provider")]
fn empty_queue_provider(world: &mut QueueWorld) {
    *world = QueueWorld::new();
}
