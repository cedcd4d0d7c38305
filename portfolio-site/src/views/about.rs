/// Biography written into the about view's text column.
pub fn about_markup() -> &'static str {
    r#"<h1>Creative Technology Director</h1>
<h2>Engineering experiences where technology becomes tangible</h2>
<p>I build interactive systems that sit between electrical engineering and
public spaces: real-time computer vision, edge inference and custom hardware
that respond to the people moving through them.</p>
<p>The work ranges from multi-camera pose estimation pipelines and sensor
networks for responsive environments to custom PCBs and browser-based WebGL
pieces, each taken from proof of concept to a production deployment and
documented so it can be rebuilt.</p>
<p>Works collects large-scale cultural installations. Projects holds personal
experiments with generative systems and new interfaces.</p>
<p><em>Press and hold on the dodecahedron to charge it with light.</em></p>"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_copy_mentions_interaction_hint() {
        assert!(about_markup().contains("Press and hold"));
        assert!(about_markup().starts_with("<h1>"));
    }
}
