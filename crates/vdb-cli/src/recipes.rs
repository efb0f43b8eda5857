//! Canned GraphQL query recipes.
//!
//! `Question` recipes target an instance loaded with `vdb import tutorial`;
//! `JeopardyQuestion` and `WikiCity` recipes work against the read-only demo
//! instance (`--readonly-demo`).

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub name: &'static str,
    /// Class the query reads
    pub class: &'static str,
    pub description: &'static str,
    pub query: &'static str,
}

pub const RECIPES: &[Recipe] = &[
    Recipe {
        name: "generative-grouped",
        class: "Question",
        description: "Near-text 'biology', one generated tweet for the whole result set",
        query: r#"{
  Get {
    Question(
      limit: 2
      nearText: { concepts: ["biology"] }
    ) {
      question
      answer
      category
      _additional {
        generate(
          groupedResult: { task: """Write a tweet with emojis about these facts.""" }
        ) {
          groupedResult
          error
        }
      }
    }
  }
}"#,
    },
    Recipe {
        name: "generative-single",
        class: "Question",
        description: "Near-text 'biology', one generated explanation per object",
        query: r#"{
  Get {
    Question(
      limit: 2
      nearText: { concepts: ["biology"] }
    ) {
      question
      answer
      category
      _additional {
        generate(
          singleResult: { prompt: """Explain {answer} as you might to a five-year-old.""" }
        ) {
          singleResult
          error
        }
      }
    }
  }
}"#,
    },
    Recipe {
        name: "where-filter",
        class: "Question",
        description: "Near-text 'biology' restricted to category ANIMALS",
        query: r#"{
  Get {
    Question(
      limit: 2
      nearText: { concepts: ["biology"] }
      where: { path: ["category"], operator: Equal, valueText: "ANIMALS" }
    ) {
      question
      answer
      category
    }
  }
}"#,
    },
    Recipe {
        name: "near-text",
        class: "Question",
        description: "Near-text 'biology'",
        query: r#"{
  Get {
    Question(
      limit: 2
      nearText: { concepts: ["biology"] }
    ) {
      question
      answer
      category
    }
  }
}"#,
    },
    Recipe {
        name: "jeopardy-near-text",
        class: "JeopardyQuestion",
        description: "Near-text 'Intergalactic travel'",
        query: r#"{
  Get {
    JeopardyQuestion(
      limit: 2
      nearText: { concepts: ["Intergalactic travel"] }
    ) {
      question
      answer
    }
  }
}"#,
    },
    Recipe {
        name: "jeopardy-near-object",
        class: "JeopardyQuestion",
        description: "Objects closest to a known object id",
        query: r#"{
  Get {
    JeopardyQuestion(
      limit: 2
      nearObject: { id: "c8f8176c-6f9b-5461-8ab3-f3c7ce8c2f5c" }
    ) {
      question
      answer
      _additional {
        distance
        id
      }
    }
  }
}"#,
    },
    Recipe {
        name: "jeopardy-aggregate",
        class: "JeopardyQuestion",
        description: "Answer count and most frequent answers",
        query: r#"{
  Aggregate {
    JeopardyQuestion(limit: 2) {
      answer {
        count
        topOccurrences {
          value
          occurs
        }
      }
    }
  }
}"#,
    },
    Recipe {
        name: "jeopardy-aggregate-grouped",
        class: "JeopardyQuestion",
        description: "Near-text 'Intergalactic travel' within distance 0.2, counted per round",
        query: r#"{
  Aggregate {
    JeopardyQuestion(
      nearText: { concepts: ["Intergalactic travel"], distance: 0.2 }
      groupBy: ["round"]
    ) {
      groupedBy {
        path
        value
      }
      meta {
        count
      }
    }
  }
}"#,
    },
    Recipe {
        name: "jeopardy-where",
        class: "JeopardyQuestion",
        description: "Near-text 'Intergalactic travel' where the question mentions rockets",
        query: r#"{
  Get {
    JeopardyQuestion(
      limit: 2
      nearText: { concepts: ["Intergalactic travel"] }
      where: { path: ["question"], operator: Like, valueText: "*rocket*" }
    ) {
      question
      answer
      _additional {
        distance
        id
      }
    }
  }
}"#,
    },
    Recipe {
        name: "jeopardy-where-multiple",
        class: "JeopardyQuestion",
        description: "As jeopardy-where, also requiring more than 400 points",
        query: r#"{
  Get {
    JeopardyQuestion(
      limit: 2
      nearText: { concepts: ["Intergalactic travel"] }
      where: {
        operator: And
        operands: [
          { path: ["question"], operator: Like, valueText: "*rocket*" }
          { path: ["points"], operator: GreaterThan, valueInt: 400 }
        ]
      }
    ) {
      question
      answer
      points
      _additional {
        distance
        id
      }
    }
  }
}"#,
    },
    Recipe {
        name: "tweet",
        class: "WikiCity",
        description: "Southeast Asian destinations with a generated tweet each",
        query: r#"{
  Get {
    WikiCity(
      limit: 3
      nearText: { concepts: ["Popular Southeast Asian tourist destination"] }
    ) {
      city_name
      wiki_summary
      _additional {
        generate(
          singleResult: { prompt: """Write a tweet with a potentially surprising fact from {wiki_summary}""" }
        ) {
          singleResult
          error
        }
      }
    }
  }
}"#,
    },
    Recipe {
        name: "london-olympics",
        class: "WikiCity",
        description: "Question answering over city summaries",
        query: r#"{
  Get {
    WikiCity(
      limit: 1
      ask: {
        question: "When was the London Olympics?"
        properties: ["wiki_summary"]
      }
    ) {
      city_name
      country
      lng
      lat
      _additional {
        answer {
          hasAnswer
          property
          result
        }
      }
    }
  }
}"#,
    },
    Recipe {
        name: "major-cities",
        class: "WikiCity",
        description: "Near-text 'Major European city'",
        query: r#"{
  Get {
    WikiCity(
      limit: 3
      nearText: { concepts: ["Major European city"] }
    ) {
      city_name
      country
      lng
      lat
    }
  }
}"#,
    },
];

/// Look up a recipe by name.
pub fn find_recipe(name: &str) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.name == name)
}
