//! Static content for every section of the page.
//!
//! All tables are fixed at compile time and consulted read-only.

use serde::Serialize;

/// A single quiz item shared by the coding and math sections.
#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub id: u32,
    pub title: &'static str,
    pub prompt: &'static str,
    /// Display formula (LaTeX source) for math problems
    pub formula: Option<&'static str>,
    pub time_limit_secs: u32,
    pub expected_answer: &'static str,
    /// Feedback lines picked when the round ends incorrect
    pub roasts: &'static [&'static str],
    /// Feedback lines picked on a correct answer; empty for coding challenges
    pub praises: &'static [&'static str],
}

/// A card in the wishes gallery
#[derive(Debug, Clone, Serialize)]
pub struct Wish {
    pub id: u32,
    pub name: &'static str,
    pub message: &'static str,
    pub avatar: &'static str,
}

pub const CODING_CHALLENGES: &[Challenge] = &[
    Challenge {
        id: 1,
        title: "Binary Tree Level Order Traversal",
        prompt: "Given the root of a binary tree, return the level order traversal of its nodes' values. (i.e., from left to right, level by level).",
        formula: None,
        time_limit_secs: 300,
        expected_answer: "[[3],[9,20],[15,7]]",
        roasts: &[
            "Gautam solved this while brushing his teeth.",
            "Even ChatGPT needs help with this.",
            "This is like a warm-up for Gautam's morning coffee.",
        ],
        praises: &[],
    },
    Challenge {
        id: 2,
        title: "Dynamic Programming Challenge",
        prompt: "Given an array of integers nums and an integer target, return the number of ways to make up the target using numbers from nums. You may use each number an infinite number of times.",
        formula: None,
        time_limit_secs: 600,
        expected_answer: "7",
        roasts: &[
            "Gautam's brain processes this faster than his morning coffee.",
            "This is what Gautam dreams about at night.",
            "Even the compiler is intimidated by Gautam's solution.",
        ],
        praises: &[],
    },
    Challenge {
        id: 3,
        title: "Graph Theory Puzzle",
        prompt: "Given a directed graph, find the longest path between any two nodes. The path should not contain any cycles.",
        formula: None,
        time_limit_secs: 900,
        expected_answer: "4",
        roasts: &[
            "Gautam's solution is so elegant, it made the problem cry.",
            "This is like a kindergarten problem for Gautam.",
            "The graph is afraid of Gautam's solution.",
        ],
        praises: &[],
    },
];

/// Math rounds share one limit; the lab gives every problem five minutes.
pub const MATH_TIME_LIMIT_SECS: u32 = 300;

pub const MATH_PROBLEMS: &[Challenge] = &[
    Challenge {
        id: 1,
        title: "Calculus Challenge",
        prompt: "Find the derivative of the following function:",
        formula: Some(r"f(x) = \int_{0}^{x} \frac{\sin(t)}{t} dt"),
        time_limit_secs: MATH_TIME_LIMIT_SECS,
        expected_answer: "sin(x)/x",
        roasts: &[
            "You made Euler cry.",
            "Even a calculator would do better.",
            "This is like kindergarten math for Gautam.",
        ],
        praises: &[
            "Respect! You're getting closer to Gautam's level.",
            "Not bad! Keep practicing and you might catch up to Gautam in a few decades.",
            "Impressive! But Gautam solved this in his sleep.",
        ],
    },
    Challenge {
        id: 2,
        title: "Linear Algebra Puzzle",
        prompt: "Find the eigenvalues of the following matrix:",
        formula: Some(r"A = \begin{pmatrix} 2 & -1 \\ -1 & 2 \end{pmatrix}"),
        time_limit_secs: MATH_TIME_LIMIT_SECS,
        expected_answer: "1,3",
        roasts: &[
            "The matrix is disappointed in your answer.",
            "Even a computer would solve this faster.",
            "Gautam's cat could solve this.",
        ],
        praises: &[
            "Well done! You're starting to think like Gautam.",
            "Not bad! Only 1000 more problems to go before you reach Gautam's level.",
            "Good job! But Gautam solved this while eating breakfast.",
        ],
    },
    Challenge {
        id: 3,
        title: "Number Theory Problem",
        prompt: "Find the smallest positive integer x such that:",
        formula: Some(r"x \equiv 2 \pmod{3}, \quad x \equiv 3 \pmod{5}, \quad x \equiv 2 \pmod{7}"),
        time_limit_secs: MATH_TIME_LIMIT_SECS,
        expected_answer: "23",
        roasts: &[
            "The numbers are laughing at your solution.",
            "Even a calculator would be embarrassed.",
            "This is like counting for Gautam.",
        ],
        praises: &[
            "Excellent! You're showing promise.",
            "Well done! Only 999 more problems to go.",
            "Good work! But Gautam solved this in his head.",
        ],
    },
];

pub const ROASTS: &[&str] = &[
    "You still use bubble sort? That's cute.",
    "Recursion scares you? Gautam eats it for breakfast.",
    "Your code is like a maze - even a GPS would get lost.",
    "I've seen better algorithms in a kindergarten math class.",
    "Your solution is so slow, it makes a snail look like Usain Bolt.",
    "Even a calculator would be embarrassed by your math skills.",
    "Your code is like a horror movie - full of bugs and no one wants to watch it.",
    "Gautam's cat could write better code than you.",
    "Your debugging skills are like finding a needle in a haystack... blindfolded.",
    "I've seen better problem-solving in a game of tic-tac-toe.",
    "Your code is so messy, even a garbage collector would give up.",
    "Gautam solves harder problems while brushing his teeth.",
    "Your algorithm is like a broken GPS - it takes the longest route possible.",
    "Even a computer would facepalm at your solution.",
    "Your code is like a bad joke - it doesn't work and no one laughs.",
    "Gautam's brain processes faster than your code runs.",
    "Your solution is like a maze - even a mouse would get lost.",
    "I've seen better optimization in a snail race.",
    "Your code is like a puzzle - no one wants to solve it.",
    "Gautam's coffee break is longer than your algorithm's runtime.",
];

/// Ordered trigger table; the first trigger found in the lowercased input wins.
pub const KEYWORD_REPLIES: &[(&str, &str)] = &[
    ("hello", "Hello! Birthday boy ko wish karo pehle! 🎂"),
    ("hi", "Hi! Cake ka piece leke aao pehle! 🍰"),
    ("how are you", "Birthday boy hoon, ekdum mast! 😎"),
    ("happy birthday", "Thank you! Ab cake ka piece le jao! 🎂"),
    ("dsa", "Aaj to party ka din hai, kal se DSA! 💻"),
    ("algorithm", "Birthday ke baad algorithms discuss karenge! 🚀"),
    ("math", "Aaj to celebration ka din hai, kal se maths! 📚"),
    ("roast", "Birthday boy ko roast nahi karte! 😤"),
    ("coding", "Aaj to cake cutting ka din hai, kal se coding! 💻"),
    ("party", "Party to chal rahi hai, aao join karo! 🎉"),
    ("gift", "Gifts to mil rahe hain, aap bhi kuch lao! 🎁"),
    ("cake", "Cake to bahut tasty hai, ek piece le jao! 🍰"),
    ("dance", "Dance floor pe milte hain! 💃"),
    ("music", "DJ bhaiya, volume thoda kam karo! 🎵"),
    ("food", "Food counter pe milte hain! 🍽️"),
];

pub const FALLBACK_REPLIES: &[&str] = &[
    "Mera birthday hai, mai kyu answer karu? 😎",
    "Birthday boy ko disturb mat karo! 🎂",
    "Aaj to party ka din hai, serious questions kal puchna! 🎉",
    "Mai to bas cake kha raha hu, baad mein baat karenge! 🍰",
    "DSA questions? Birthday ke baad solve karenge! 💻",
    "Maths? Aaj to celebration ka din hai! 📚",
    "Roast? Birthday boy ko roast nahi karte! 😤",
    "Mai to bas wishes collect kar raha hu, baad mein baat karenge! 🎁",
    "Aaj to special day hai, kal se normal mode on! 🎈",
    "Birthday boy busy hai, cake cutting ke baad milte hain! 🎂",
    "Mai to bas dance kar raha hu, baad mein baat karenge! 💃",
    "Aaj to party mode on hai, kal se coding mode on! 🚀",
    "Birthday boy ko rest chahiye, kal se active rahenge! 😴",
    "Mai to bas gifts collect kar raha hu, baad mein baat karenge! 🎁",
    "Aaj to celebration ka din hai, kal se serious mode on! 🎉",
];

pub const WISHES: &[Wish] = &[
    Wish {
        id: 1,
        name: "DSA Buddy",
        message: "Happy Birthday to the guy who makes complex algorithms look like child's play! 🎉",
        avatar: "👨‍💻",
    },
    Wish {
        id: 2,
        name: "Math Genius",
        message: "Another year of making Euler proud! Happy Birthday! 🎂",
        avatar: "🧮",
    },
    Wish {
        id: 3,
        name: "Code Master",
        message: "To the person who can debug with their eyes closed. Happy Birthday! 🎈",
        avatar: "💻",
    },
    Wish {
        id: 4,
        name: "Problem Solver",
        message: "Happy Birthday to the guy who turns coffee into code! ☕",
        avatar: "⚡",
    },
    Wish {
        id: 5,
        name: "Algorithm Wizard",
        message: "May your birthday be as optimized as your code! 🎊",
        avatar: "✨",
    },
    Wish {
        id: 6,
        name: "Math Whiz",
        message: "Happy Birthday to the human calculator! 🎯",
        avatar: "🎯",
    },
];

/// Hero heading, as (greeting, name)
pub const LANDING_HEADLINE: (&str, &str) = ("Happy Birthday", "Gautam Jain");

pub const LANDING_TAGLINES: &[&str] = &["DSA King 👑", "Maths Genius 🧮", "Roast Legend 🔥"];

pub const BRAIN_WELCOME: (&str, &[&str]) = ("Welcome to Gautam's Brain", &["Proceed with caution"]);

pub const BRAIN_TOO_COMPLEX: (&str, &[&str]) = (
    "Too Complex! 🤯",
    &[
        "Even Gautam's brain is too complex for mere mortals to understand!",
        "Maybe stick to the DSA Dojo instead? 😅",
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decks_are_populated() {
        assert_eq!(CODING_CHALLENGES.len(), 3);
        assert_eq!(MATH_PROBLEMS.len(), 3);
        for challenge in CODING_CHALLENGES.iter().chain(MATH_PROBLEMS) {
            assert!(!challenge.roasts.is_empty(), "{} has no roasts", challenge.title);
            assert!(challenge.time_limit_secs > 0);
        }
        assert!(CODING_CHALLENGES.iter().all(|c| c.praises.is_empty()));
        assert!(MATH_PROBLEMS.iter().all(|c| !c.praises.is_empty() && c.formula.is_some()));
    }

    #[test]
    fn test_keyword_triggers_are_lowercase() {
        for (trigger, _) in KEYWORD_REPLIES {
            assert_eq!(*trigger, trigger.to_lowercase());
        }
    }

    #[test]
    fn test_wishes_serialize() {
        let json = serde_json::to_string(WISHES).unwrap();
        assert!(json.contains("Algorithm Wizard"));
        assert_eq!(WISHES.len(), 6);
    }
}
