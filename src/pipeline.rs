use std::time::Instant;

use tracing::{debug, info};

use crate::aggregate;
use crate::assign::assign_labels;
use crate::cluster::{cluster_vectors, ClusterParams};
use crate::config::AnalyzeConfig;
use crate::error::AnalyzeError;
use crate::labels;
use crate::models::{Analysis, ReviewAnalysis};
use crate::normalize::normalize;
use crate::sentiment;
use crate::topics::{Dictionary, TopicModel};
use crate::vectorize::TfidfSpace;

/// Run the full analysis pipeline over one batch of reviews.
///
/// Stages run strictly forward, each consuming the previous stage's output:
/// normalization, topic modeling, label synthesis, TF-IDF embedding, density
/// clustering, label assignment, sentiment scoring, aggregation. Everything
/// is derived fresh for this batch; no state survives the call.
///
/// Fails as a unit: on any error nothing is returned, never a partial
/// `Analysis`.
pub fn analyze(reviews: &[String], config: &AnalyzeConfig) -> Result<Analysis, AnalyzeError> {
    let pipeline_start = Instant::now();
    info!(
        "Analysis started - reviews={}, topics={}, labels={}, seed={}",
        reviews.len(),
        config.topic_count,
        config.label_count,
        config.random_seed
    );

    let token_docs = normalize(reviews, &config.domain_stopwords)?;

    let dictionary = Dictionary::build(&token_docs)?;
    let bows: Vec<_> = token_docs
        .iter()
        .map(|doc| dictionary.doc_to_bow(doc))
        .collect();

    let lda_start = Instant::now();
    let model = TopicModel::fit(
        &dictionary,
        &bows,
        config.topic_count,
        config.lda_passes,
        config.random_seed,
    )?;
    let topics = model.topics(&dictionary, config.terms_per_topic);
    info!(
        "Topic model fitted - topics={}, duration={:.2}s",
        model.topic_count(),
        lda_start.elapsed().as_secs_f32()
    );

    let label_names = labels::synthesize(&topics, config);
    if label_names.is_empty() {
        // Normalization already removed domain stopwords, so an empty label
        // set means label_count or terms_per_topic was zero.
        return Err(AnalyzeError::InvalidInput(
            "label_count and terms_per_topic must be at least 1".to_string(),
        ));
    }

    let processed: Vec<String> = token_docs.iter().map(|doc| doc.join(" ")).collect();
    let space = TfidfSpace::fit(&processed, config.max_df, config.min_df, config.ngram_range)?;
    let review_vectors = space.transform(&processed);
    let label_sentences: Vec<String> = label_names
        .iter()
        .map(|label| format!("{label} review is"))
        .collect();
    let label_vectors = space.transform(&label_sentences);
    debug!(
        "Vector space ready - dimensions={}, labels={:?}",
        space.dimensions(),
        label_names
    );

    let cluster_start = Instant::now();
    let cluster_ids = cluster_vectors(
        &review_vectors,
        ClusterParams {
            min_cluster_size: config.min_cluster_size,
            min_samples: config.min_samples,
        },
    );
    info!(
        "Clustering completed - duration={:.2}s",
        cluster_start.elapsed().as_secs_f32()
    );

    let named_labels = assign_labels(
        &review_vectors,
        &cluster_ids,
        &label_names,
        &label_vectors,
        config.similarity_threshold,
    );

    // Sentiment runs on the raw text; normalization destroys the negation
    // and punctuation context the lexicon needs.
    let per_review: Vec<ReviewAnalysis> = reviews
        .iter()
        .zip(named_labels)
        .zip(&cluster_ids)
        .map(|((review, labels), &cluster)| {
            let scored = sentiment::score(review);
            ReviewAnalysis {
                sentiment: scored.sentiment,
                polarity: scored.polarity,
                named_labels: labels,
                cluster,
            }
        })
        .collect();

    let per_category = aggregate::summarize(&per_review);

    info!(
        "Analysis completed - duration={:.2}s, reviews={}, categories={}",
        pipeline_start.elapsed().as_secs_f32(),
        per_review.len(),
        per_category.len()
    );
    Ok(Analysis {
        per_review,
        per_category,
    })
}
