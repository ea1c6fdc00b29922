use super::*;

#[test]
fn linkedin_slug_and_bare_domain() {
    assert_eq!(
        normalize_social_url(Platform::Linkedin, "alexjohnson").as_deref(),
        Some("https://linkedin.com/in/alexjohnson")
    );
    assert_eq!(
        normalize_social_url(Platform::Linkedin, "linkedin.com/in/alexjohnson").as_deref(),
        Some("https://linkedin.com/in/alexjohnson")
    );
}

#[test]
fn github_slug_bare_domain_and_scheme() {
    assert_eq!(
        normalize_social_url(Platform::Github, "octocat").as_deref(),
        Some("https://github.com/octocat")
    );
    assert_eq!(
        normalize_social_url(Platform::Github, "github.com/octocat").as_deref(),
        Some("https://github.com/octocat")
    );
    assert_eq!(
        normalize_social_url(Platform::Github, "https://github.com/x").as_deref(),
        Some("https://github.com/x")
    );
}

#[test]
fn twitter_and_instagram_strip_at_sign() {
    assert_eq!(
        normalize_social_url(Platform::Twitter, "@jdoe").as_deref(),
        Some("https://twitter.com/jdoe")
    );
    assert_eq!(
        normalize_social_url(Platform::Twitter, "jdoe").as_deref(),
        Some("https://twitter.com/jdoe")
    );
    assert_eq!(
        normalize_social_url(Platform::Instagram, "@jdoe.art").as_deref(),
        Some("https://instagram.com/jdoe.art")
    );
    assert_eq!(
        normalize_social_url(Platform::Instagram, "http://instagram.com/x").as_deref(),
        Some("http://instagram.com/x")
    );
}

#[test]
fn blank_input_is_absent() {
    for p in Platform::ALL {
        assert_eq!(normalize_social_url(p, ""), None);
        assert_eq!(normalize_social_url(p, "   "), None);
    }
}

#[test]
fn platforms_map_to_fields() {
    for p in Platform::ALL {
        assert_eq!(p.field().key(), p.as_str());
        assert_eq!(p.as_str().parse::<Platform>().unwrap(), p);
    }
}
