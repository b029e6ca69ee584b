use crate::backend::Prediction;

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

serde_plain::derive_display_from_serialize!(Emotion);
serde_plain::derive_fromstr_from_deserialize!(Emotion);

impl Emotion {
    /// Fixed category order. Ties for the dominant emotion resolve to whichever comes first here.
    pub const ALL: [Emotion; 5] = [Emotion::Anger, Emotion::Disgust, Emotion::Fear, Emotion::Joy, Emotion::Sadness];
}

// Checked top to bottom; the first family with a matching substring wins.
const KEYWORD_FAMILIES: [(Emotion, &[&str]); 5] = [
    (
        Emotion::Joy,
        &[
            "joy",
            "happy",
            "happiness",
            "optimism",
            "optimistic",
            "amusement",
            "excit",
            "relief",
            "love",
            "pride",
            "admiration",
            "approval",
            "gratitude",
        ],
    ),
    (Emotion::Anger, &["anger", "angry", "annoy", "annoyance", "rage", "disapproval"]),
    (Emotion::Disgust, &["disgust", "disgusted", "dislik"]),
    (Emotion::Fear, &["fear", "afraid", "anxious", "anxiety", "nervous"]),
    (Emotion::Sadness, &["sad", "sadness", "grief", "sorrow", "remorse", "disappointment"]),
];

/// What a "surprise" label turns into once no keyword family matched it.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum SurprisePolicy {
    Ignore,
    MapTo(Emotion),
}

impl Default for SurprisePolicy {
    fn default() -> Self {
        SurprisePolicy::MapTo(Emotion::Joy)
    }
}

impl std::str::FromStr for SurprisePolicy {
    type Err = serde_plain::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "ignore" => Ok(SurprisePolicy::Ignore),
            _ => Ok(SurprisePolicy::MapTo(s.parse()?)),
        }
    }
}

impl TryFrom<String> for SurprisePolicy {
    type Error = serde_plain::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Default, Clone, Debug)]
pub struct LabelMapper {
    pub surprise: SurprisePolicy,
}

impl LabelMapper {
    pub fn new(surprise: SurprisePolicy) -> Self {
        Self { surprise }
    }

    pub fn map(&self, label: &str) -> Option<Emotion> {
        let label = label.to_lowercase();

        for (emotion, keywords) in KEYWORD_FAMILIES.iter() {
            if keywords.iter().any(|k| label.contains(k)) {
                return Some(*emotion);
            }
        }

        match self.surprise {
            SurprisePolicy::MapTo(emotion) if label.contains("surprise") => Some(emotion),
            _ => None,
        }
    }
}

/// How several labels landing on the same category combine.
#[derive(serde::Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    #[default]
    Sum,
    Max,
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct CategoryScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl CategoryScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    fn get_mut(&mut self, emotion: Emotion) -> &mut f64 {
        match emotion {
            Emotion::Anger => &mut self.anger,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Fear => &mut self.fear,
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.iter().map(move |e| (*e, self.get(*e)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    fn is_all_zero(&self) -> bool {
        self.iter().all(|(_, v)| v == 0.0)
    }

    fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return *self;
        }

        let mut out = *self;
        for e in Emotion::ALL {
            *out.get_mut(e) /= total;
        }
        out
    }

    fn dominant(&self) -> Option<Emotion> {
        if self.total() <= 0.0 {
            return None;
        }

        let mut best: Option<(Emotion, f64)> = None;
        for (e, v) in self.iter() {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((e, v));
            }
        }
        best.map(|(e, _)| e)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ClassificationResult {
    pub anger: Option<f64>,
    pub disgust: Option<f64>,
    pub fear: Option<f64>,
    pub joy: Option<f64>,
    pub sadness: Option<f64>,
    pub dominant_emotion: Option<Emotion>,
}

impl ClassificationResult {
    /// The degraded result: every score and the dominant emotion absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> Option<CategoryScores> {
        Some(CategoryScores {
            anger: self.anger?,
            disgust: self.disgust?,
            fear: self.fear?,
            joy: self.joy?,
            sadness: self.sadness?,
        })
    }

    fn from_scores(scores: CategoryScores, dominant_emotion: Option<Emotion>) -> Self {
        Self {
            anger: Some(scores.anger),
            disgust: Some(scores.disgust),
            fear: Some(scores.fear),
            joy: Some(scores.joy),
            sadness: Some(scores.sadness),
            dominant_emotion,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct Aggregator {
    pub mapper: LabelMapper,
    pub accumulation: Accumulation,
}

impl Aggregator {
    pub fn new(mapper: LabelMapper, accumulation: Accumulation) -> Self {
        Self { mapper, accumulation }
    }

    pub fn aggregate(&self, predictions: &[Prediction]) -> ClassificationResult {
        let mut scores = CategoryScores::default();

        for p in predictions {
            let target = if let Some(target) = self.mapper.map(&p.label) {
                target
            } else {
                log::debug!("unmapped label: {:?}", p.label);
                continue;
            };

            let slot = scores.get_mut(target);
            match self.accumulation {
                Accumulation::Sum => *slot += p.score,
                Accumulation::Max => *slot = slot.max(p.score),
            }
        }

        if scores.is_all_zero() {
            if let Some(top) = top_prediction(predictions) {
                if let Some(target) = self.mapper.map(&top.label) {
                    log::debug!("no category scored, falling back to top prediction {:?}", top.label);
                    *scores.get_mut(target) = top.score;
                }
            }
        }

        let scores = scores.normalized();
        ClassificationResult::from_scores(scores, scores.dominant())
    }
}

// First prediction with the highest score.
fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    let mut top: Option<&Prediction> = None;
    for p in predictions {
        if top.map_or(true, |t| p.score > t.score) {
            top = Some(p);
        }
    }
    top
}
