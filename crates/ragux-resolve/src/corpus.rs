//! Mock corpus: the fixed payload every mock response is cut from.
//!
//! A corpus is plain data built once at startup and shared read-only.
//! It is either the compiled-in user-research payload or a JSON file of
//! the same shape, and is integrity-checked before use.

use std::collections::HashSet;
use std::path::Path;

use ragux_core::{Error, Result};
use ragux_protocol::{Image, Quote, QuoteMetadata, SearchResponse, Source};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockCorpus {
    /// Payload for search and answer lookups.
    pub search: SearchResponse,
    /// Summary that replaces `search.summary` on follow-up turns.
    pub followup_summary: String,
}

/// Counts reported by `check-corpus` and `/api/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub quotes: usize,
    pub sources: usize,
    pub images: usize,
}

const DEBT_SCREEN_ID: &str = "R-2023-02-KK-DebtScreenRedesign";
const DEBT_SCREEN_TITLE: &str = "Редизайн экрана задолженности по кредитной карте";
const DEBT_SCREEN_DATE: &str = "2023-02";
const DEBT_SCREEN_ITERATION: &str = "3";

const DEBT_SCREEN_SUMMARY: &str = "Беспроцентный период (БП) требует явной визуализации финальной даты и легенды прогресс-бара. Обязательный платёж должен сопровождаться микрокопией о назначении. Проценты за снятие наличных/переводы нужно акцентировать заголовком и примером в день.";

const DEBT_SCREEN_FOLLOWUP_SUMMARY: &str = "Уточняющий ответ: визуализация БП требует явной даты окончания и легенды. Обязательный платёж нуждается в микротексте.";

/// (text, distance) per chunk, in relevance order.
const DEBT_SCREEN_FINDINGS: [(&str, f64); 6] = [
    ("Несколько БП считываются, но финальные даты и правило «120 дней» без явного расчёта остаются неочевидны; нужна явная дата окончания и легенда графики.", 0.23),
    ("Виджет «Обязательный платёж» помогает, но часть пользователей не понимает назначение и ожидает сумму/диапазон; требуется микротекст и ориентир по сумме.", 0.28),
    ("Прогресс-бар БП и точки интерпретируются неверно; требуется легенда/подписи, разграничение таймлайна и плана выплат.", 0.31),
    ("Предложение «вернуть всю сумму до [дата]» понятно и повышает доверие.", 0.35),
    ("Блоки «Снятие наличных/переводы» малозаметны; нужны акцентные заголовки, пояснение «проценты с даты операции» и явная ставка/≈в день.", 0.38),
    ("Баннеры перегружены датами; оставить одну ключевую дату, остальное — в подсказки.", 0.41),
];

const DEBT_SCREEN_FIGURES: [(&str, &str); 2] = [
    ("03_assets/2023_02_KK_DebtScreenRedesign/R-2023-02-KK-DebtScreenRedesign_fig02.png", "Основные наблюдения"),
    ("03_assets/2023_02_KK_DebtScreenRedesign/R-2023-02-KK-DebtScreenRedesign_fig03.png", "Сравнение итераций"),
];

impl MockCorpus {
    /// The compiled-in credit-card debt screen study.
    pub fn builtin() -> Self {
        let quotes = DEBT_SCREEN_FINDINGS
            .iter()
            .enumerate()
            .map(|(i, (text, distance))| Quote {
                id: format!("q{}", i + 1),
                text: (*text).into(),
                metadata: QuoteMetadata {
                    id: DEBT_SCREEN_ID.into(),
                    title: DEBT_SCREEN_TITLE.into(),
                    iteration: DEBT_SCREEN_ITERATION.into(),
                    date: DEBT_SCREEN_DATE.into(),
                    filename: format!("{}.md", DEBT_SCREEN_ID),
                    section_path: "Основные наблюдения".into(),
                    chunk_index: i as u32,
                    product: "Кредитная СберКарта".into(),
                    tags: None,
                },
                distance: Some(*distance),
            })
            .collect();

        let images = DEBT_SCREEN_FIGURES
            .iter()
            .map(|(path, alt)| Image {
                path: (*path).into(),
                alt: Some((*alt).into()),
                source_id: DEBT_SCREEN_ID.into(),
            })
            .collect();

        Self {
            search: SearchResponse {
                summary: DEBT_SCREEN_SUMMARY.into(),
                quotes,
                sources: vec![Source {
                    id: DEBT_SCREEN_ID.into(),
                    title: DEBT_SCREEN_TITLE.into(),
                    date: DEBT_SCREEN_DATE.into(),
                    iteration: DEBT_SCREEN_ITERATION.into(),
                }],
                images,
            },
            followup_summary: DEBT_SCREEN_FOLLOWUP_SUMMARY.into(),
        }
    }

    /// Load a corpus from a JSON file and check it.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let corpus: MockCorpus = serde_json::from_str(&data)?;
        corpus.check_integrity()?;
        info!(
            "Loaded corpus from {} ({} quotes)",
            path.display(),
            corpus.search.quotes.len()
        );
        Ok(corpus)
    }

    /// The file at `path` if given, otherwise the builtin corpus.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let corpus = Self::builtin();
                corpus.check_integrity()?;
                Ok(corpus)
            }
        }
    }

    /// Source ids are unique, every quote and image points at a known
    /// source, and distances are finite and non-negative.
    pub fn check_integrity(&self) -> Result<()> {
        let mut problems = Vec::new();
        let mut ids = HashSet::new();

        for source in &self.search.sources {
            if !ids.insert(source.id.as_str()) {
                problems.push(format!("duplicate source id {}", source.id));
            }
        }

        for quote in &self.search.quotes {
            if !ids.contains(quote.metadata.id.as_str()) {
                problems.push(format!(
                    "quote {} references unknown source {}",
                    quote.id, quote.metadata.id
                ));
            }
            if let Some(d) = quote.distance {
                if !d.is_finite() || d < 0.0 {
                    problems.push(format!("quote {} has invalid distance {}", quote.id, d));
                }
            }
        }

        for image in &self.search.images {
            if !ids.contains(image.source_id.as_str()) {
                problems.push(format!(
                    "image {} references unknown source {}",
                    image.path, image.source_id
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Corpus(problems.join("; ")))
        }
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            quotes: self.search.quotes.len(),
            sources: self.search.sources.len(),
            images: self.search.images.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let corpus = MockCorpus::builtin();
        assert_eq!(
            corpus.stats(),
            CorpusStats {
                quotes: 6,
                sources: 1,
                images: 2,
            }
        );
        assert_eq!(corpus.search.sources[0].id, "R-2023-02-KK-DebtScreenRedesign");
        assert_eq!(corpus.search.quotes[0].id, "q1");
        assert_eq!(corpus.search.quotes[5].metadata.chunk_index, 5);
        assert_ne!(corpus.search.summary, corpus.followup_summary);
        corpus.check_integrity().unwrap();
    }

    #[test]
    fn test_builtin_distances_increase() {
        let corpus = MockCorpus::builtin();
        let distances: Vec<f64> = corpus
            .search
            .quotes
            .iter()
            .map(|q| q.distance.unwrap())
            .collect();
        assert_eq!(distances, vec![0.23, 0.28, 0.31, 0.35, 0.38, 0.41]);
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_integrity_violations() {
        let mut corpus = MockCorpus::builtin();
        corpus.search.quotes[0].metadata.id = "missing".into();
        corpus.search.quotes[1].distance = Some(-0.1);
        corpus.search.images[0].source_id = "also-missing".into();
        let dup = corpus.search.sources[0].clone();
        corpus.search.sources.push(dup);

        let err = corpus.check_integrity().unwrap_err().to_string();
        assert!(err.contains("duplicate source id"));
        assert!(err.contains("quote q1 references unknown source missing"));
        assert!(err.contains("quote q2 has invalid distance"));
        assert!(err.contains("references unknown source also-missing"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let mut corpus = MockCorpus::builtin();
        corpus.search.summary = "custom".into();
        std::fs::write(&path, serde_json::to_string_pretty(&corpus).unwrap()).unwrap();

        let loaded = MockCorpus::load(&path).unwrap();
        assert_eq!(loaded, corpus);

        let fallback = MockCorpus::load_or_builtin(None).unwrap();
        assert_eq!(fallback, MockCorpus::builtin());
    }

    #[test]
    fn test_load_rejects_broken_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let mut corpus = MockCorpus::builtin();
        corpus.search.sources.clear();
        std::fs::write(&path, serde_json::to_string(&corpus).unwrap()).unwrap();
        assert!(matches!(MockCorpus::load(&path), Err(Error::Corpus(_))));

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(MockCorpus::load(&path), Err(Error::Json(_))));

        let missing = dir.path().join("nope.json");
        assert!(matches!(MockCorpus::load(&missing), Err(Error::Io(_))));
    }
}
