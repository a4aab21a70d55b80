use crate::{
    data::MovieStore,
    models::{Recommendation, RecommendationSet},
    services::providers::MetadataProvider,
};

/// Generates enriched recommendations for a movie title
///
/// Looks up the `count` nearest neighbors of `title` in the similarity table,
/// then fetches metadata for the selected movie followed by each neighbor in
/// rank order. Fetches run one after another, so latency grows linearly with
/// `count`.
///
/// Returns `None` when `title` is not in the movie table.
pub async fn get_recommendations(
    store: &MovieStore,
    provider: &dyn MetadataProvider,
    title: &str,
    count: usize,
) -> Option<RecommendationSet> {
    let input = store.find_by_title(title)?.clone();
    let candidates = store.recommend(title, count);

    tracing::info!(
        title = %title,
        requested = count,
        found = candidates.len(),
        provider = provider.name(),
        "Similarity lookup completed"
    );

    let input_metadata = provider.fetch_metadata(input.id).await;

    let mut recommendations = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let metadata = provider.fetch_metadata(candidate.movie.id).await;
        recommendations.push(Recommendation {
            movie: candidate.movie.clone(),
            score: candidate.score,
            metadata,
        });
    }

    let missing = recommendations
        .iter()
        .filter(|r| r.metadata.is_empty())
        .count();
    if missing > 0 {
        tracing::warn!(
            title = %title,
            missing_metadata = missing,
            "Some recommendations have no metadata"
        );
    }

    Some(RecommendationSet {
        input,
        input_metadata,
        recommendations,
    })
}
