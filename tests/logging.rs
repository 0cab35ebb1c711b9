// Runs in its own process so the frame entry point is the
// first thing to touch the logger.
use log::LevelFilter;

#[test]
fn frame_entry_point_installs_the_logger() {
    assert_eq!(log::max_level(), LevelFilter::Off);
    glshim::do_frame();
    assert_ne!(log::max_level(), LevelFilter::Off);
}
