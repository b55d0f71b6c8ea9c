// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use tft_rolldown::progress::{ProgressSnapshot, render_into};
use tft_rolldown::Stage;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn progress_renders_into_dom() {
    let doc = web_sys::window().unwrap().document().unwrap();
    let el = doc.create_element("div").unwrap();
    el.set_id("tft-progress-test");
    doc.body().unwrap().append_child(&el).unwrap();

    let snap = ProgressSnapshot { stage: Stage::Parsing, is_active: true, ..Default::default() };
    render_into("tft-progress-test", &snap).unwrap();
    assert!(el.inner_html().contains("Parsing game data..."));

    assert!(render_into("missing-element", &snap).is_err());
}

#[wasm_bindgen_test]
fn sound_player_without_assets_stays_quiet() {
    let mut player = tft_rolldown::bindings::SoundPlayer::new(Some("/no-such-dir/".to_string()));
    player.initialize();
    player.set_volume(3.0);
    assert_eq!(player.volume(), 1.0);
    assert!(!player.play("not_a_sound"));
    player.dispose();
}

#[wasm_bindgen_test]
fn repeated_plays_share_one_rejection_handler() {
    let mut player = tft_rolldown::bindings::SoundPlayer::new(Some("/no-such-dir/".to_string()));
    player.initialize();
    for _ in 0..50 {
        player.play_buy();
        player.play_reroll();
    }
    player.check_load_failures();
    player.dispose();
    assert!(!player.play_buy());
}
