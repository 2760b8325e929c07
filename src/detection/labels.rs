use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

/// The 90-slot COCO index space used by off-the-shelf detection models.
/// Several indices are genuinely unassigned in that convention; lookups for
/// them fall back to a synthetic label.
const COCO_LABELS: &[(u32, &str)] = &[
    (0, "person"),
    (1, "bicycle"),
    (2, "car"),
    (3, "motorcycle"),
    (4, "airplane"),
    (5, "bus"),
    (6, "train"),
    (7, "truck"),
    (8, "boat"),
    (9, "traffic light"),
    (10, "fire hydrant"),
    (12, "stop sign"),
    (13, "parking meter"),
    (14, "bench"),
    (15, "bird"),
    (16, "cat"),
    (17, "dog"),
    (18, "horse"),
    (19, "sheep"),
    (20, "cow"),
    (21, "elephant"),
    (22, "bear"),
    (23, "zebra"),
    (24, "giraffe"),
    (26, "backpack"),
    (27, "umbrella"),
    (30, "handbag"),
    (31, "tie"),
    (32, "suitcase"),
    (33, "frisbee"),
    (34, "skis"),
    (35, "snowboard"),
    (36, "sports ball"),
    (37, "kite"),
    (38, "baseball bat"),
    (39, "baseball glove"),
    (40, "skateboard"),
    (41, "surfboard"),
    (42, "tennis racket"),
    (43, "bottle"),
    (45, "wine glass"),
    (46, "cup"),
    (47, "fork"),
    (48, "knife"),
    (49, "spoon"),
    (50, "bowl"),
    (51, "banana"),
    (52, "apple"),
    (53, "sandwich"),
    (54, "orange"),
    (55, "broccoli"),
    (56, "carrot"),
    (57, "hot dog"),
    (58, "pizza"),
    (59, "donut"),
    (60, "cake"),
    (61, "chair"),
    (62, "couch"),
    (63, "potted plant"),
    (64, "bed"),
    (66, "dining table"),
    (69, "toilet"),
    (71, "tv"),
    (72, "laptop"),
    (73, "mouse"),
    (74, "remote"),
    (75, "keyboard"),
    (76, "cell phone"),
    (77, "microwave"),
    (78, "oven"),
    (79, "toaster"),
    (80, "sink"),
    (81, "refrigerator"),
    (83, "book"),
    (84, "clock"),
    (85, "vase"),
    (86, "scissors"),
    (87, "teddy bear"),
    (88, "hair drier"),
    (89, "toothbrush"),
];

/// Partial mapping from detector class index to display label.
#[derive(Debug, Clone)]
pub struct LabelTable {
    entries: HashMap<u32, String>,
}

impl LabelTable {
    /// The built-in COCO table most bundled detection models are trained on.
    pub fn coco() -> Self {
        Self::from_entries(
            COCO_LABELS
                .iter()
                .map(|&(index, label)| (index, label.to_string())),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Load a table from a JSON object mapping class indices to labels,
    /// e.g. `{"2": "car", "5": "bus"}`.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("cannot read label file {}", path.display()))?;
        let raw: HashMap<String, String> = serde_json::from_slice(&bytes)
            .with_context(|| format!("label file {} is not a JSON object", path.display()))?;

        let mut entries = HashMap::new();
        for (key, label) in raw {
            let index: u32 = key
                .parse()
                .with_context(|| format!("label key {:?} is not a class index", key))?;
            entries.insert(index, label);
        }
        Ok(Self { entries })
    }

    /// The label for `index`, or `None` if the table does not map it.
    pub fn get(&self, index: u32) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    /// The label for `index`, falling back to a synthetic "Class {index}"
    /// when the table does not map it. Never fails.
    pub fn lookup(&self, index: u32) -> String {
        match self.get(index) {
            Some(label) => label.to_string(),
            None => format!("Class {}", index),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::coco()
    }
}
