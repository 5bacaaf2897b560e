//! Skill taxonomy: career field -> category -> canonical skill -> synonyms

use crate::error::{PlacementError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Field used when a requested field has no taxonomy entry.
pub const DEFAULT_FIELD: &str = "Software Development";

/// Fields a student can pick from. Not every entry has a taxonomy of its own.
pub const SELECTABLE_FIELDS: &[&str] = &[
    "Software Development",
    "Data Science",
    "Frontend Development",
    "Backend Development",
    "DevOps Engineering",
    "Mobile Development",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    pub fields: Vec<FieldTaxonomy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTaxonomy {
    pub name: String,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Canonical skill name, e.g. "React"
    pub name: String,
    /// Lowercase textual variants, e.g. "reactjs", "react.js"
    pub synonyms: Vec<String>,
}

impl FieldTaxonomy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, name: &str, skills: &[(&str, &[&str])]) -> Self {
        self.categories.push(SkillCategory {
            name: name.to_string(),
            skills: skills
                .iter()
                .map(|(skill, synonyms)| SkillEntry {
                    name: skill.to_string(),
                    synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        });
        self
    }

    /// All skill entries of the field in declaration order.
    pub fn skills(&self) -> impl Iterator<Item = &SkillEntry> {
        self.categories.iter().flat_map(|c| c.skills.iter())
    }

    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    pub fn contains_skill(&self, skill: &str) -> bool {
        self.skills().any(|s| s.name == skill)
    }
}

impl SkillTaxonomy {
    pub fn new(fields: Vec<FieldTaxonomy>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldTaxonomy> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// True if `skill` is a canonical name anywhere in the taxonomy.
    pub fn is_canonical(&self, skill: &str) -> bool {
        self.fields.iter().any(|f| f.contains_skill(skill))
    }

    /// Load a taxonomy from a JSON file. Synonyms are lowercased on load.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlacementError::Configuration(format!(
                "Failed to read taxonomy '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut taxonomy: SkillTaxonomy = serde_json::from_str(&content).map_err(|e| {
            PlacementError::Configuration(format!(
                "Failed to parse taxonomy '{}': {}",
                path.display(),
                e
            ))
        })?;

        for skill in taxonomy
            .fields
            .iter_mut()
            .flat_map(|f| f.categories.iter_mut())
            .flat_map(|c| c.skills.iter_mut())
        {
            for synonym in skill.synonyms.iter_mut() {
                *synonym = synonym.trim().to_lowercase();
            }
        }

        taxonomy.validate()?;
        Ok(taxonomy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(PlacementError::Configuration(
                "Taxonomy defines no fields".to_string(),
            ));
        }

        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(PlacementError::Configuration(
                    "Taxonomy contains a field with an empty name".to_string(),
                ));
            }
            for skill in field.skills() {
                if skill.name.trim().is_empty() {
                    return Err(PlacementError::Configuration(format!(
                        "Field '{}' contains a skill with an empty name",
                        field.name
                    )));
                }
                if skill.synonyms.is_empty() {
                    return Err(PlacementError::Configuration(format!(
                        "Skill '{}' in field '{}' has no synonyms",
                        skill.name, field.name
                    )));
                }
                if let Some(bad) = skill
                    .synonyms
                    .iter()
                    .find(|s| s.trim().is_empty() || s.to_lowercase() != **s)
                {
                    return Err(PlacementError::Configuration(format!(
                        "Skill '{}' in field '{}' has an invalid synonym '{}' (must be non-empty lowercase)",
                        skill.name, field.name, bad
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::new(vec![
            software_development(),
            frontend_development(),
            backend_development(),
            data_science(),
        ])
    }
}

fn software_development() -> FieldTaxonomy {
    FieldTaxonomy::new("Software Development")
        .with_category("core", &[
            ("JavaScript", &["javascript", "js", "es6", "es2015", "ecmascript", "vanilla js", "typescript", "ts"]),
            ("Python", &["python", "py", "python3", "django", "flask", "fastapi"]),
            ("Java", &["java", "java8", "java11", "java17", "spring", "spring boot", "hibernate"]),
            ("C++", &["c++", "cpp", "c plus plus", "stl", "boost"]),
            ("C#", &["c#", "csharp", ".net", "dotnet", "asp.net", ".net core"]),
        ])
        .with_category("web", &[
            ("HTML", &["html", "html5", "semantic html", "web development"]),
            ("CSS", &["css", "css3", "scss", "sass", "less", "styled-components", "tailwind"]),
            ("React", &["react", "reactjs", "react.js", "react native", "redux", "hooks"]),
            ("Angular", &["angular", "angularjs", "angular2+", "ng", "typescript"]),
            ("Vue.js", &["vue", "vuejs", "vue.js", "vuex", "nuxt"]),
            ("Node.js", &["node", "nodejs", "node.js", "express", "nestjs", "deno"]),
        ])
        .with_category("database", &[
            ("SQL", &["sql", "mysql", "postgresql", "database", "rdbms", "oracle"]),
            ("MongoDB", &["mongodb", "mongo", "nosql", "mongoose", "document db"]),
            ("Redis", &["redis", "caching", "in-memory", "key-value"]),
            ("PostgreSQL", &["postgresql", "postgres", "psql"]),
        ])
        .with_category("tools", &[
            ("Git", &["git", "github", "gitlab", "bitbucket", "version control"]),
            ("Docker", &["docker", "containerization", "kubernetes", "k8s", "container"]),
            ("AWS", &["aws", "amazon web services", "cloud", "ec2", "s3", "lambda"]),
            ("Linux", &["linux", "unix", "bash", "shell scripting", "command line"]),
        ])
}

fn frontend_development() -> FieldTaxonomy {
    FieldTaxonomy::new("Frontend Development")
        .with_category("core", &[
            ("JavaScript", &["javascript", "js", "es6", "es2015", "typescript", "ts"]),
            ("HTML", &["html", "html5", "semantic html", "accessibility", "a11y"]),
            ("CSS", &["css", "css3", "scss", "sass", "less", "styled-components", "tailwind"]),
        ])
        .with_category("frameworks", &[
            ("React", &["react", "reactjs", "react.js", "hooks", "redux", "context api"]),
            ("Vue.js", &["vue", "vuejs", "vue.js", "vuex", "composition api"]),
            ("Angular", &["angular", "angularjs", "angular2+", "rxjs", "ngrx"]),
            ("Next.js", &["next", "nextjs", "next.js", "ssr", "static site"]),
            ("Svelte", &["svelte", "sveltekit", "reactive"]),
        ])
        .with_category("tools", &[
            ("Webpack", &["webpack", "bundler", "module bundler"]),
            ("Jest", &["jest", "testing", "unit test", "react testing library"]),
            ("TypeScript", &["typescript", "ts", "type safety"]),
            ("GraphQL", &["graphql", "apollo", "relay"]),
        ])
        .with_category("design", &[
            ("UI/UX", &["ui design", "ux design", "user interface", "user experience", "figma", "sketch"]),
            ("Responsive Design", &["responsive", "mobile first", "media queries"]),
            ("CSS Frameworks", &["bootstrap", "material ui", "tailwind", "chakra ui"]),
        ])
}

fn backend_development() -> FieldTaxonomy {
    FieldTaxonomy::new("Backend Development")
        .with_category("core", &[
            ("Node.js", &["node", "nodejs", "express", "nestjs", "fastify"]),
            ("Python", &["python", "django", "flask", "fastapi", "sqlalchemy"]),
            ("Java", &["java", "spring", "spring boot", "hibernate", "jakarta ee"]),
            ("Spring Boot", &["spring boot", "springboot"]),
            ("Go", &["golang", "go lang", "goroutines", "gin"]),
            ("PHP", &["php", "laravel", "symfony", "composer"]),
        ])
        .with_category("database", &[
            ("SQL", &["sql", "mysql", "postgresql", "oracle", "sql server"]),
            ("NoSQL", &["mongodb", "dynamodb", "cassandra", "couchbase"]),
            ("GraphQL", &["graphql", "apollo server", "prisma"]),
            ("Redis", &["redis", "caching", "pub/sub", "session store"]),
        ])
        .with_category("architecture", &[
            ("Microservices", &["microservices", "service mesh", "api gateway"]),
            ("REST", &["rest", "restful", "api design", "swagger", "openapi"]),
            ("Message Queues", &["rabbitmq", "kafka", "redis pub/sub", "sqs"]),
        ])
        .with_category("devops", &[
            ("Docker", &["docker", "containerization", "docker-compose"]),
            ("Kubernetes", &["kubernetes", "k8s", "container orchestration"]),
            ("CI/CD", &["jenkins", "github actions", "gitlab ci", "travis"]),
        ])
}

fn data_science() -> FieldTaxonomy {
    FieldTaxonomy::new("Data Science")
        .with_category("core", &[
            ("Python", &["python", "py", "python3", "numpy", "pandas"]),
            ("R", &["r programming", "r language", "rstudio", "tidyverse"]),
            ("SQL", &["sql", "mysql", "postgresql", "database querying"]),
            ("Statistics", &["statistics", "statistical analysis", "hypothesis testing", "probability"]),
            ("Machine Learning", &["machine learning", "ml", "deep learning", "neural networks", "ai"]),
            ("Deep Learning", &["deep learning", "neural networks", "cnn", "rnn", "transformers"]),
        ])
        .with_category("libraries", &[
            ("TensorFlow", &["tensorflow", "tf", "keras", "deep learning"]),
            ("PyTorch", &["pytorch", "torch", "neural networks"]),
            ("Scikit-learn", &["scikit-learn", "sklearn", "machine learning"]),
            ("Pandas", &["pandas", "pd", "data manipulation"]),
            ("NumPy", &["numpy", "np", "numerical computing"]),
            ("SciPy", &["scipy", "scientific computing"]),
            ("Matplotlib", &["matplotlib", "plt", "data visualization"]),
            ("Seaborn", &["seaborn", "sns", "statistical visualization"]),
        ])
        .with_category("tools", &[
            ("Jupyter", &["jupyter", "jupyter notebook", "jupyter lab", "colab"]),
            ("Git", &["git", "github", "version control"]),
            ("Docker", &["docker", "containerization"]),
            ("Spark", &["spark", "pyspark", "apache spark", "big data"]),
            ("Hadoop", &["hadoop", "hdfs", "mapreduce", "big data"]),
        ])
        .with_category("concepts", &[
            ("Data Visualization", &["visualization", "dashboards", "tableau", "power bi"]),
            ("Big Data", &["big data", "hadoop", "spark", "distributed computing"]),
            ("NLP", &["natural language processing", "nlp", "text analysis", "bert"]),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_taxonomy_is_valid() {
        let taxonomy = SkillTaxonomy::default();
        taxonomy.validate().unwrap();
        assert!(taxonomy.field(DEFAULT_FIELD).is_some());
        assert_eq!(taxonomy.field_names().len(), 4);
    }

    #[test]
    fn test_skills_keep_declaration_order() {
        let taxonomy = SkillTaxonomy::default();
        let field = taxonomy.field("Frontend Development").unwrap();
        let names: Vec<&str> = field.skills().take(4).map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["JavaScript", "HTML", "CSS", "React"]);
    }

    #[test]
    fn test_selectable_fields_without_taxonomy() {
        let taxonomy = SkillTaxonomy::default();
        assert!(taxonomy.field("DevOps Engineering").is_none());
        assert!(SELECTABLE_FIELDS.contains(&"DevOps Engineering"));
    }

    #[test]
    fn test_validate_rejects_uppercase_synonym() {
        let taxonomy = SkillTaxonomy::new(vec![
            FieldTaxonomy::new("Web").with_category("core", &[("React", &["React"])]),
        ]);
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_load_from_file_lowercases_synonyms() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"fields":[{{"name":"Web","categories":[{{"name":"core","skills":[{{"name":"React","synonyms":["ReactJS"," react "]}}]}}]}}]}}"#
        )
        .unwrap();

        let taxonomy = SkillTaxonomy::load_from_file(file.path()).unwrap();
        let skill = taxonomy.field("Web").unwrap().skills().next().unwrap();
        assert_eq!(skill.synonyms, vec!["reactjs".to_string(), "react".to_string()]);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = SkillTaxonomy::load_from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(PlacementError::Configuration(_))));
    }
}
