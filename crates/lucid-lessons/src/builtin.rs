//! Lessons and gallery entries that ship with Lucid

use lucid_core::{Scene, SceneCatalog, Script};

use crate::error::LessonResult;
use crate::library::{GalleryEntry, Lesson};

/// Duration of the single scene of the generic explainer
pub const GENERIC_SCENE_DURATION_MS: u64 = 1000;

/// Narration spoken by the generic explainer for `title`
pub fn generic_narration(title: &str) -> String {
    format!(
        "Welcome to the lesson on {title}. This is a generated interactive module. \
         Lucid analyzes the topic structure and builds a custom visual guide just for you."
    )
}

/// One-scene explainer for topics without an authored lesson
pub fn generic_script(title: &str) -> Script {
    let catalog = SceneCatalog::single(GENERIC_SCENE_DURATION_MS, generic_narration(title));
    Script::new(title, catalog)
}

type SceneRow = (u32, u64, &'static str);

const BIOGAS: &[SceneRow] = &[
    (
        1,
        4000,
        "Let’s take a quick look at how biogas is created using nothing more than organic waste and a bit of biology.",
    ),
    (
        2,
        7000,
        "Biogas starts with organic material — kitchen scraps, manure, and plant matter — all fed into an airtight container called a digester.",
    ),
    (
        3,
        11000,
        "Inside the digester, bacteria break down the waste in a process called anaerobic digestion — meaning it happens without oxygen. As the microbes eat, they release methane-rich biogas.",
    ),
    (
        4,
        9000,
        "The gas rises to the top, gets collected through a pipe, and stored under pressure.",
    ),
    (
        5,
        9000,
        "That stored biogas can then be burned for cooking or used to run a generator that produces electricity.",
    ),
    (
        6,
        11000,
        "It reduces waste, lowers pollution, and provides clean, renewable energy — especially helpful in rural and off-grid communities.",
    ),
    (7, 6000, "So in simple terms, biogas turns everyday organic waste into useful energy."),
    (8, 5000, "This is Lucid — making the world’s knowledge easier to understand."),
];

const FALL_OF_ROME: &[SceneRow] = &[
    (1, 3000, "Rome didn’t fall in one night. It eroded — slowly, and for many reasons."),
    (
        2,
        6000,
        "At its peak, Rome ruled an enormous territory connected by roads, trade, and a disciplined army.",
    ),
    (
        3,
        8000,
        "But size came with a price. Defending such a huge border drained money faster than Rome could collect it.",
    ),
    (
        4,
        10000,
        "Inside the empire, politics turned chaotic. Corruption spread, emperors changed rapidly, and inflation weakened the economy.",
    ),
    (
        5,
        8000,
        "Meanwhile, migrating groups from the north pressed into Roman lands, fleeing the Huns and searching for stability.",
    ),
    (
        6,
        10000,
        "Eventually, the empire split. The richer Eastern half survived. But the West weakened until it could no longer defend itself.",
    ),
    (
        7,
        8000,
        "In 476 CE, the final Western emperor was deposed — a symbol of an empire that had already faded.",
    ),
    (8, 5000, "Rome didn't fall from one cause, but from many forces piling up over centuries."),
    (9, 3000, "This is Lucid — making the past clear."),
];

const SPECIAL_RELATIVITY: &[SceneRow] = &[
    (1, 3000, "Special relativity reshapes how we understand space, time, and motion."),
    (
        2,
        7000,
        "First idea: the speed of light is the same for everyone. No matter how fast you move, light always outruns everything by the same amount.",
    ),
    (
        3,
        10000,
        "If two observers move differently, they still measure the same speed of light. To make that work, something deeper must adjust.",
    ),
    (
        4,
        10000,
        "In a moving frame, the path that light must travel becomes longer. And because light’s speed is fixed, the moving clock must tick slower.",
    ),
    (
        5,
        8000,
        "To preserve light’s constancy, distances adjust as well. Objects moving fast shrink in the direction of motion.",
    ),
    (
        6,
        10000,
        "Even the idea of ‘two events happening at the same time’ depends on who’s moving. Different observers slice time differently.",
    ),
    (
        7,
        8000,
        "All these effects — time dilation, length contraction, simultaneity — come from one geometric truth: light paths fix the structure of spacetime.",
    ),
    (
        8,
        5000,
        "Space and time reshape themselves so that the laws of nature, especially light’s speed, stay consistent for everyone.",
    ),
    (9, 3000, "This is Lucid — clarity in motion."),
];

const NEURAL_NETWORKS: &[SceneRow] = &[
    (
        1,
        3000,
        "A neural network is a system that learns to transform inputs into meaningful outputs.",
    ),
    (
        2,
        8000,
        "Each unit, or neuron, takes numbers in, mixes them together, applies a rule, and sends out a new number.",
    ),
    (
        3,
        8000,
        "Stack these neurons into layers, and each layer extracts more abstract patterns than the last.",
    ),
    (
        4,
        10000,
        "When you give the network data, the signal flows forward. Each neuron reacts based on the numbers it receives.",
    ),
    (
        5,
        10000,
        "These connections have strengths, called weights. They determine how strongly one neuron influences another.",
    ),
    (
        6,
        10000,
        "Learning is simply adjusting these weights so the network’s output gets closer to the correct answer.",
    ),
    (7, 8000, "Once trained, the network can detect patterns — in images, sound, text, or data."),
    (
        8,
        6000,
        "A neural network is a machine that learns how to turn inputs into predictions by adjusting its connections.",
    ),
    (9, 3000, "This is Lucid — clarity in motion."),
];

const PHOTOSYNTHESIS: &[SceneRow] = &[
    (1, 3000, "Photosynthesis is how plants turn sunlight into energy they can use."),
    (
        2,
        6000,
        "Sunlight provides the energy, captured by leaves in tiny molecular solar panels called chlorophyll.",
    ),
    (
        3,
        8000,
        "Plants take in water from the roots and carbon dioxide from the air. These molecules fuel the chemical reactions.",
    ),
    (
        4,
        10000,
        "Sunlight excites electrons in chlorophyll, moving them along a chain that stores energy in molecules called ATP and NADPH.",
    ),
    (
        5,
        10000,
        "Next, ATP and NADPH help convert carbon dioxide into glucose — sugar that powers the plant.",
    ),
    (6, 6000, "Oxygen is released as a byproduct, giving us the air we breathe."),
    (7, 6000, "In short, sunlight + water + CO₂ = glucose for the plant and oxygen for the world."),
    (
        8,
        5000,
        "Photosynthesis powers life on Earth, capturing energy from the sun in a beautiful natural process.",
    ),
    (9, 3000, "This is Lucid — making complex natural processes easy to understand."),
];

const REACT_HOOKS: &[SceneRow] = &[
    (
        1,
        3000,
        "React Hooks let functional components manage state and side effects, making your code cleaner and more powerful.",
    ),
    (
        2,
        6000,
        "In React, components can be functions. Hooks give these functions the power to store and react to changing data.",
    ),
    (
        3,
        10000,
        "useState lets you store a value in a component. When it changes, React automatically updates what the user sees.",
    ),
    (
        4,
        8000,
        "Clicking a button can trigger a state update. Hooks ensure the UI reacts seamlessly.",
    ),
    (
        5,
        10000,
        "useEffect runs code when state or props change. It’s perfect for side effects like fetching data or updating the document title.",
    ),
    (
        6,
        8000,
        "The dependency array tells React when to run the effect. Only changes in listed variables trigger the code.",
    ),
    (
        7,
        6000,
        "Hooks like useState and useEffect let functional components manage state and side effects cleanly — no classes needed.",
    ),
    (
        8,
        6000,
        "In practice, hooks let your UI stay reactive while keeping code simple and readable.",
    ),
    (9, 3000, "This is Lucid — making complex programming concepts easy to understand."),
];

/// (slug, title, subject, scenes)
const LESSONS: &[(&str, &str, &str, &[SceneRow])] = &[
    ("biogas", "Biogas generation", "Energy", BIOGAS),
    ("fall-of-rome", "Fall of Rome", "History", FALL_OF_ROME),
    ("special-relativity", "Special Relativity", "Physics", SPECIAL_RELATIVITY),
    ("neural-networks", "Neural Networks", "Computer Science", NEURAL_NETWORKS),
    ("photosynthesis", "Photosynthesis", "Biology", PHOTOSYNTHESIS),
    ("react-hooks", "React Hooks", "Programming", REACT_HOOKS),
];

const GALLERY: &[(&str, &str)] = &[
    ("The Chain Rule", "Calculus"),
    ("Fall of Rome", "History"),
    ("Special Relativity", "Physics"),
    ("Neural Networks", "Computer Science"),
    ("Photosynthesis", "Biology"),
    ("React Hooks", "Programming"),
];

pub(crate) fn lessons() -> LessonResult<Vec<Lesson>> {
    LESSONS
        .iter()
        .map(|&(slug, title, subject, rows)| {
            let scenes = rows
                .iter()
                .map(|&(id, duration, narration)| Scene::new(id, duration, narration))
                .collect();
            Lesson::new(slug, title, subject, scenes)
        })
        .collect()
}

pub(crate) fn gallery() -> Vec<GalleryEntry> {
    GALLERY
        .iter()
        .map(|&(title, subject)| GalleryEntry::new(title, subject))
        .collect()
}
