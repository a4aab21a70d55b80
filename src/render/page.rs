use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{join_list, or_placeholder};
use crate::{
    models::{Movie, MovieMetadata, Recommendation, MAX_RECOMMENDATIONS, MIN_RECOMMENDATIONS},
    session::{SessionResults, SessionState},
};

const ORIGINAL_POSTER_SIZE: &str = "w300";
const CARD_POSTER_SIZE: &str = "w200";

const STYLE: &str = r#"
    body { font-family: system-ui, Arial, sans-serif; margin: 0; display: flex; color: #262730; }
    aside { width: 300px; min-height: 100vh; padding: 1.5rem; background: #F0F2F6; box-sizing: border-box; }
    aside select, aside input, aside button { width: 100%; margin: 0.4rem 0 1rem; }
    main { flex: 1; padding: 2rem 3rem; max-width: 1100px; }
    section { margin-bottom: 2.5rem; }
    .movie { display: flex; gap: 1.5rem; padding: 1rem 0; border-bottom: 1px solid #DDD; }
    .poster { flex: 0 0 auto; text-align: center; font-size: 0.85em; color: #666; }
    .poster .missing { display: inline-block; width: 150px; padding: 4rem 0; background: #EEE; }
    .details-section { font-family: Arial, sans-serif; color: #4A4A4A; padding: 10px; background-color: #EFEFEF; border-radius: 8px; margin-top: 10px; }
    .notice { padding: 1rem; background: #FFF4E5; border-radius: 8px; }
    footer { text-align: center; font-size: 0.9em; padding: 10px; border-top: 1px solid #DDD; }
"#;

const FOOTER: &str = "<footer><strong>© PyDataLabWithRik, 2025</strong><br>\
                      <em>Copyright Apache License 2.0</em></footer>\n";

/// Everything needed to render the page for one session
pub struct PageContext<'a> {
    /// Selector options, in movie table order
    pub titles: Vec<&'a str>,
    pub image_base_url: &'a str,
    pub session: &'a SessionState,
}

/// Renders the full page from session state.
///
/// Rendering has no side effects, so the same state always produces the same
/// document.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Movie Recommendation System 🎥</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    html.push_str(&render_sidebar(ctx));

    html.push_str("<main>\n<h1>Content-Based Movie Recommendations 🎥</h1>\n");
    html.push_str(
        "<p><strong>Welcome to the Movie Recommendation System!</strong></p>\n<ul>\n\
         <li>Select your favorite movie from the sidebar.</li>\n\
         <li>Adjust the slider for the number of recommendations.</li>\n\
         <li>Explore personalized movie suggestions with detailed info!</li>\n</ul>\n",
    );

    if let Some(results) = &ctx.session.results {
        html.push_str(&render_results(ctx, results));
    }

    html.push_str(FOOTER);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(ctx: &PageContext<'_>) -> String {
    let selected = ctx
        .session
        .results
        .as_ref()
        .map(|r| r.selected_title.as_str());

    let mut options = String::new();
    for title in &ctx.titles {
        let marker = if Some(*title) == selected {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            encode_double_quoted_attribute(title),
            marker,
            encode_text(title)
        ));
    }

    let count = ctx
        .session
        .last_count
        .clamp(MIN_RECOMMENDATIONS, MAX_RECOMMENDATIONS);

    format!(
        "<aside>\n<h2>Movie Recommendations 🎥</h2>\n\
         <p>Select a movie and get personalized recommendations.</p>\n\
         <form method=\"post\" action=\"/recommendations\">\n\
         <label for=\"movie\">Select a Movie:</label>\n\
         <select id=\"movie\" name=\"movie\">\n{}</select>\n\
         <label for=\"count\">Number of Recommendations: <output id=\"count-value\">{}</output></label>\n\
         <input id=\"count\" name=\"count\" type=\"range\" min=\"{}\" max=\"{}\" value=\"{}\" \
         oninput=\"document.getElementById('count-value').value = this.value\">\n\
         <button type=\"submit\">Get Recommendations</button>\n\
         </form>\n</aside>\n",
        options, count, MIN_RECOMMENDATIONS, MAX_RECOMMENDATIONS, count
    )
}

fn render_results(ctx: &PageContext<'_>, results: &SessionResults) -> String {
    let Some(set) = &results.set else {
        return format!(
            "<section id=\"recommended\">\n<h2>Recommended Movies</h2>\n\
             <p class=\"notice\">No recommendations found for <strong>{}</strong>.</p>\n</section>\n",
            encode_text(&results.selected_title)
        );
    };

    let mut html = String::new();
    html.push_str(&render_original(
        ctx,
        &set.input,
        &set.input_metadata,
        ctx.session.show_original_details,
    ));

    html.push_str("<section id=\"recommended\">\n<h2>Recommended Movies</h2>\n");
    if set.recommendations.is_empty() {
        html.push_str("<p class=\"notice\">No similar movies found.</p>\n");
    }
    for recommendation in &set.recommendations {
        let expanded = ctx.session.is_expanded(recommendation.movie.id);
        html.push_str(&render_recommendation(ctx, recommendation, expanded));
    }
    html.push_str("</section>\n");
    html
}

fn render_original(
    ctx: &PageContext<'_>,
    movie: &Movie,
    metadata: &MovieMetadata,
    show_details: bool,
) -> String {
    let mut html = format!(
        "<section id=\"original\">\n<h2>Original Movie</h2>\n<h3>Details for: {}</h3>\n\
         <div class=\"movie\">\n{}<div>\n",
        encode_text(&movie.title),
        render_poster(ctx, metadata, ORIGINAL_POSTER_SIZE, 200)
    );
    html.push_str(&render_attributes(movie));
    html.push_str(&render_toggle(
        "/details/original",
        "Show More Details 🔥",
        show_details,
    ));
    if show_details {
        html.push_str(&render_details(metadata, None));
    }
    html.push_str("</div>\n</div>\n</section>\n");
    html
}

fn render_recommendation(
    ctx: &PageContext<'_>,
    recommendation: &Recommendation,
    expanded: bool,
) -> String {
    let movie = &recommendation.movie;
    let metadata = &recommendation.metadata;

    let mut html = format!(
        "<div class=\"movie\" id=\"movie-{}\">\n{}<div>\n<h3>{}</h3>\n",
        movie.id,
        render_poster(ctx, metadata, CARD_POSTER_SIZE, 150),
        encode_text(&movie.title)
    );
    html.push_str(&render_attributes(movie));
    html.push_str(&render_toggle(
        &format!("/details/{}", movie.id),
        "Details 🔍",
        expanded,
    ));
    if expanded {
        html.push_str(&render_details(metadata, Some(&movie.keywords)));
    }
    html.push_str("</div>\n</div>\n");
    html
}

fn render_poster(ctx: &PageContext<'_>, metadata: &MovieMetadata, size: &str, width: u32) -> String {
    let caption = metadata
        .tagline
        .as_deref()
        .map(|tagline| encode_text(tagline).into_owned())
        .unwrap_or_default();

    let image = match metadata.poster_url(ctx.image_base_url, size) {
        Some(url) => format!(
            "<img src=\"{}\" width=\"{}\" alt=\"poster\">",
            encode_double_quoted_attribute(&url),
            width
        ),
        None => format!("<span class=\"missing\">{}</span>", super::PLACEHOLDER),
    };

    format!(
        "<div class=\"poster\">{}<div>{}</div></div>\n",
        image, caption
    )
}

fn render_attributes(movie: &Movie) -> String {
    format!(
        "<p><strong>Genres:</strong> {}</p>\n<p>{}</p>\n\
         <p><strong>Director:</strong> {}</p>\n<p><strong>Cast:</strong> {}</p>\n",
        join_list(&movie.genres),
        encode_text(&movie.overview),
        join_list(&movie.crew),
        join_list(&movie.cast)
    )
}

fn render_toggle(action: &str, label: &str, expanded: bool) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\" aria-expanded=\"{}\">{}</button></form>\n",
        action, expanded, label
    )
}

fn render_details(metadata: &MovieMetadata, keywords: Option<&[String]>) -> String {
    let mut html = String::from("<div class=\"details-section\">\n");
    html.push_str(&format!(
        "<b>Release Date:</b> {}<br>\n",
        or_placeholder(metadata.release_date.as_ref())
    ));
    html.push_str(&format!(
        "<b>Revenue:</b> {}<br>\n",
        or_placeholder(metadata.revenue.as_ref())
    ));
    html.push_str(&format!(
        "<b>Popularity:</b> {}<br>\n",
        or_placeholder(metadata.popularity.as_ref())
    ));
    html.push_str(&format!(
        "<b>Vote Count:</b> {}<br>\n",
        or_placeholder(metadata.vote_count.as_ref())
    ));
    html.push_str(&format!(
        "<b>Vote Average:</b> {}<br>\n",
        or_placeholder(metadata.vote_average.as_ref())
    ));
    if let Some(keywords) = keywords {
        html.push_str(&format!("<b>Keywords:</b> {}<br>\n", join_list(keywords)));
    }
    html.push_str("</div>\n");
    html
}
