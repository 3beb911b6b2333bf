use approx::assert_relative_eq;
use eclipse_ngin::{
    config::FilmParams,
    panel::{BLOOM_STRENGTH_STEP, FILM_COUNT_STEP, PanelAction, ParamPanel},
    postprocessing::{PassChain, PassKind},
};
use winit::keyboard::KeyCode;

fn bloom_of(action: Option<PanelAction>) -> eclipse_ngin::config::BloomParams {
    match action {
        Some(PanelAction::SetBloom(bloom)) => bloom,
        other => panic!("expected a bloom change, got {:?}", other),
    }
}

fn film_of(action: Option<PanelAction>) -> FilmParams {
    match action {
        Some(PanelAction::SetFilm(film)) => film,
        other => panic!("expected a film change, got {:?}", other),
    }
}

#[test]
fn keys_step_bloom_parameters() {
    let chain = PassChain::default();
    let up = bloom_of(ParamPanel::handle_key(KeyCode::KeyB, false, &chain));
    assert_relative_eq!(up.strength, 0.8 + BLOOM_STRENGTH_STEP);
    assert_eq!(up.threshold, 0.1);

    let down = bloom_of(ParamPanel::handle_key(KeyCode::KeyT, true, &chain));
    assert_relative_eq!(down.threshold, 0.05, epsilon = 1e-6);
    assert_eq!(down.strength, 0.8);
}

#[test]
fn values_never_go_negative() {
    let mut chain = PassChain::default();
    for _ in 0..12 {
        let bloom = bloom_of(ParamPanel::handle_key(KeyCode::KeyR, true, &chain));
        chain.set_bloom(bloom);
    }
    assert_eq!(chain.bloom().radius, 0.0);
}

#[test]
fn scanline_count_stays_positive() {
    let mut chain = PassChain::new(
        Default::default(),
        FilmParams {
            scanline_count: 10,
            ..FilmParams::default()
        },
    );
    let film = film_of(ParamPanel::handle_key(KeyCode::KeyC, true, &chain));
    assert_eq!(film.scanline_count, 1);
    chain.set_film(film);

    let film = film_of(ParamPanel::handle_key(KeyCode::KeyC, false, &chain));
    assert_eq!(film.scanline_count, 1 + FILM_COUNT_STEP);
}

#[test]
fn grayscale_toggles() {
    let chain = PassChain::default();
    let film = film_of(ParamPanel::handle_key(KeyCode::KeyG, false, &chain));
    assert!(film.grayscale);
    assert_eq!(film.noise_intensity, chain.film().noise_intensity);
}

#[test]
fn digits_toggle_passes() {
    let mut chain = PassChain::default();
    assert_eq!(
        ParamPanel::handle_key(KeyCode::Digit3, false, &chain),
        Some(PanelAction::Toggle(PassKind::Film, false))
    );
    chain.set_enabled(PassKind::Film, false).unwrap();
    assert_eq!(
        ParamPanel::handle_key(KeyCode::Digit3, false, &chain),
        Some(PanelAction::Toggle(PassKind::Film, true))
    );
    assert_eq!(
        ParamPanel::handle_key(KeyCode::Digit1, false, &chain),
        Some(PanelAction::Toggle(PassKind::Bloom, false))
    );
}

#[test]
fn unmapped_keys_do_nothing() {
    let chain = PassChain::default();
    assert_eq!(ParamPanel::handle_key(KeyCode::KeyQ, false, &chain), None);
    assert_eq!(ParamPanel::handle_key(KeyCode::Escape, true, &chain), None);
}
