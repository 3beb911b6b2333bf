use eclipse_ngin::{
    SceneError,
    config::{BloomParams, FilmParams, SceneConfig},
    postprocessing::{PassChain, PassKind, PassState},
};

#[test]
fn default_chain_runs_everything_into_film() {
    let chain = PassChain::default();
    assert_eq!(
        chain.enabled_passes().collect::<Vec<_>>(),
        PassKind::ORDER.to_vec()
    );
    assert_eq!(chain.terminal(), PassKind::Film);
    assert!(chain.is_terminal(PassKind::Film));
    assert_eq!(
        PassKind::ORDER
            .iter()
            .filter(|k| chain.is_terminal(**k))
            .count(),
        1
    );
    chain.validate().unwrap();
}

#[test]
fn bloom_defaults_read_back() {
    let config = SceneConfig::default();
    let chain = PassChain::new(config.bloom, config.film);
    let bloom = chain.bloom();
    assert_eq!(bloom.strength, 0.8);
    assert_eq!(bloom.threshold, 0.1);
    assert_eq!(bloom.radius, 1.0);
}

#[test]
fn parameter_changes_keep_the_terminal_pass() {
    let mut chain = PassChain::default();
    chain.set_bloom(BloomParams {
        strength: 2.0,
        threshold: 0.5,
        radius: 0.2,
    });
    chain.set_film(FilmParams {
        grayscale: true,
        ..FilmParams::default()
    });
    assert_eq!(chain.terminal(), PassKind::Film);
    assert_eq!(chain.bloom().strength, 2.0);
    assert!(chain.film().grayscale);
}

#[test]
fn disabling_the_terminal_pass_promotes_the_previous_one() {
    let mut chain = PassChain::default();
    assert_eq!(
        chain.set_enabled(PassKind::Film, false).unwrap(),
        PassKind::Antialias
    );
    assert_eq!(
        chain.set_enabled(PassKind::Antialias, false).unwrap(),
        PassKind::Bloom
    );
    assert_eq!(
        chain.set_enabled(PassKind::Bloom, false).unwrap(),
        PassKind::Render
    );
    chain.validate().unwrap();

    assert_eq!(
        chain.set_enabled(PassKind::Antialias, true).unwrap(),
        PassKind::Antialias
    );
    assert_eq!(
        chain.enabled_passes().collect::<Vec<_>>(),
        vec![PassKind::Render, PassKind::Antialias]
    );
}

#[test]
fn disabling_a_middle_pass_keeps_the_terminal() {
    let mut chain = PassChain::default();
    assert_eq!(
        chain.set_enabled(PassKind::Bloom, false).unwrap(),
        PassKind::Film
    );
    assert_eq!(chain.state(PassKind::Bloom), PassState::Disabled);
}

#[test]
fn render_pass_cannot_be_toggled() {
    let mut chain = PassChain::default();
    assert!(matches!(
        chain.set_enabled(PassKind::Render, false),
        Err(SceneError::ChainInvariant(_))
    ));
    assert!(chain.mark_unavailable(PassKind::Render).is_err());
    assert!(chain.is_enabled(PassKind::Render));
}

#[test]
fn unavailable_passes_are_skipped_for_good() {
    let mut chain = PassChain::default();
    assert_eq!(
        chain.mark_unavailable(PassKind::Film).unwrap(),
        PassKind::Antialias
    );
    assert_eq!(chain.state(PassKind::Film), PassState::Unavailable);
    assert!(matches!(
        chain.set_enabled(PassKind::Film, true),
        Err(SceneError::PassUnavailable {
            kind: PassKind::Film,
            ..
        })
    ));
    assert_eq!(chain.terminal(), PassKind::Antialias);
}
