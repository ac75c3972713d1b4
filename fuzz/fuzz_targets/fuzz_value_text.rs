#![no_main]

use libfuzzer_sys::fuzz_target;
use twinrange_core::Handle;
use twinrange_widgets::{EditOutcome, EditableValueController, RangeDomain, ValueSpace};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let space = ValueSpace::new(RangeDomain::continuous(-1000.0, 1000.0, 0.25));

    // Anything parse accepts is finite and formats without panicking.
    if let Some(value) = space.parse(text) {
        assert!(value.is_finite());
        let snapped = space.snap(value);
        assert!((-1000.0..=1000.0).contains(&snapped));
        let _ = space.format(snapped);
    }

    // Typing the text character by character never leaves a buffer the
    // edit pattern would reject.
    let mut editor = EditableValueController::new(true);
    assert!(editor.begin(Handle::Min, 0.0, &space));
    editor.set_text("");
    for c in text.chars().take(64) {
        editor.insert(c);
    }
    match editor.commit(&space) {
        EditOutcome::Commit { value, .. } => assert!(value.is_finite()),
        EditOutcome::Reverted { .. } => {}
        other => panic!("unexpected outcome {other:?}"),
    }
});
