//! Canned response templates per (language, category).
//!
//! Templates serve two purposes:
//! - few-shot examples inside the classification prompt
//! - guaranteed-valid fallback replies when model output is unusable
//!
//! The catalog is built once at startup and never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────

/// Closed set of email categories. Any category appearing in a
/// classification result must be one of these six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PaymentIssue,
    TechnicalSupport,
    InformationRequest,
    Greeting,
    Complaint,
    Spam,
}

impl Category {
    /// All categories, in prompt/display order.
    pub const ALL: [Category; 6] = [
        Category::PaymentIssue,
        Category::TechnicalSupport,
        Category::InformationRequest,
        Category::Greeting,
        Category::Complaint,
        Category::Spam,
    ];

    /// Wire name (snake_case), as the model is instructed to emit it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PaymentIssue => "payment_issue",
            Category::TechnicalSupport => "technical_support",
            Category::InformationRequest => "information_request",
            Category::Greeting => "greeting",
            Category::Complaint => "complaint",
            Category::Spam => "spam",
        }
    }

    /// Parse a wire name. Unknown strings are rejected here — this is
    /// the single boundary where loosely-typed category values enter
    /// the system.
    pub fn parse(raw: &str) -> Option<Category> {
        match raw {
            "payment_issue" => Some(Category::PaymentIssue),
            "technical_support" => Some(Category::TechnicalSupport),
            "information_request" => Some(Category::InformationRequest),
            "greeting" => Some(Category::Greeting),
            "complaint" => Some(Category::Complaint),
            "spam" => Some(Category::Spam),
            _ => None,
        }
    }

    /// Whether an email of this category requires action.
    ///
    /// Derived, never stored: everything except greetings and spam.
    pub fn is_productive(&self) -> bool {
        !matches!(self, Category::Greeting | Category::Spam)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Catalog ─────────────────────────────────────────────────────────

/// A canned (subject, body) reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTemplate {
    pub subject: &'static str,
    pub body: &'static str,
}

/// Read-only mapping `language → category → template`.
pub struct TemplateCatalog {
    languages: HashMap<&'static str, HashMap<Category, ResponseTemplate>>,
}

impl TemplateCatalog {
    /// Build the catalog with the built-in Portuguese and English sets.
    pub fn builtin() -> Self {
        let mut languages = HashMap::new();
        languages.insert("pt", portuguese_templates());
        languages.insert("en", english_templates());
        Self { languages }
    }

    /// Look up the template for a (language, category) pair.
    pub fn get(&self, language: &str, category: Category) -> Option<ResponseTemplate> {
        self.languages
            .get(language)
            .and_then(|templates| templates.get(&category))
            .copied()
    }

    /// Whether any templates exist for this language.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Languages the catalog carries.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.languages.keys().copied()
    }
}

fn portuguese_templates() -> HashMap<Category, ResponseTemplate> {
    HashMap::from([
        (
            Category::PaymentIssue,
            ResponseTemplate {
                subject: "Re: Problema com Pagamento - Equipe Financeira",
                body: "Prezado(a) cliente,\n\n\
                    Recebemos sua solicitação referente ao problema com pagamento. \
                    Nossa equipe financeira já está analisando seu caso e trabalhando para resolver a situação o mais rápido possível. \
                    Entendemos a importância dessa questão e daremos prioridade ao seu atendimento.\n\n\
                    Um especialista da área financeira entrará em contato em até 24 horas com uma solução \
                    ou com os próximos passos necessários para regularizar a situação.\n\n\
                    Agradecemos pela compreensão e paciência.\n\n\
                    Atenciosamente,\n\
                    Equipe de Suporte Financeiro",
            },
        ),
        (
            Category::TechnicalSupport,
            ResponseTemplate {
                subject: "Re: Suporte Técnico - Análise em Andamento",
                body: "Prezado(a) cliente,\n\n\
                    Obrigado por reportar o problema técnico. Nossa equipe de engenharia já iniciou \
                    a investigação detalhada do caso que você descreveu. Compreendemos como isso pode impactar \
                    sua experiência com nosso produto.\n\n\
                    Estamos trabalhando para identificar a causa raiz e implementar uma solução. \
                    Você receberá atualizações sobre o progresso e, assim que resolvermos, \
                    entraremos em contato imediatamente.\n\n\
                    Enquanto isso, se tiver informações adicionais que possam nos ajudar, \
                    fique à vontade para responder este email.\n\n\
                    Atenciosamente,\n\
                    Equipe de Suporte Técnico",
            },
        ),
        (
            Category::InformationRequest,
            ResponseTemplate {
                subject: "Re: Sua Solicitação de Informações",
                body: "Olá,\n\n\
                    Obrigado pelo seu interesse! Recebemos sua solicitação de informações \
                    e teremos prazer em ajudá-lo com os detalhes que precisa.\n\n\
                    Nossa equipe de atendimento está preparando uma resposta completa e detalhada \
                    para sua pergunta. Você receberá todas as informações solicitadas em breve, \
                    junto com materiais adicionais que podem ser úteis.\n\n\
                    Se tiver outras dúvidas enquanto isso, não hesite em nos contatar.\n\n\
                    Atenciosamente,\n\
                    Equipe de Atendimento ao Cliente",
            },
        ),
        (
            Category::Greeting,
            ResponseTemplate {
                subject: "Re: Sua Mensagem",
                body: "Olá,\n\n\
                    Agradecemos muito pelo seu contato e pelas palavras gentis! \
                    É sempre um prazer ouvir de nossos clientes.\n\n\
                    Desejamos tudo de melhor para você também!\n\n\
                    Atenciosamente,\n\
                    Equipe de Suporte",
            },
        ),
        (
            Category::Complaint,
            ResponseTemplate {
                subject: "Re: Seu Feedback - Prioridade Alta",
                body: "Prezado(a) cliente,\n\n\
                    Lamentamos profundamente pela experiência negativa que você teve. \
                    Seu feedback é extremamente importante para nós e levamos todas as reclamações muito a sério.\n\n\
                    Sua situação foi encaminhada para nossa gerência com prioridade alta. \
                    Estamos comprometidos em resolver este problema e garantir que sua experiência melhore significativamente. \
                    Um supervisor entrará em contato pessoalmente em até 12 horas para discutir uma solução adequada.\n\n\
                    Agradecemos pela oportunidade de corrigir a situação.\n\n\
                    Atenciosamente,\n\
                    Gerência de Atendimento ao Cliente",
            },
        ),
        (
            Category::Spam,
            ResponseTemplate {
                subject: "Re: Mensagem Recebida",
                body: "Olá,\n\n\
                    Agradecemos pelo contato.\n\n\
                    Atenciosamente,\n\
                    Equipe de Suporte",
            },
        ),
    ])
}

fn english_templates() -> HashMap<Category, ResponseTemplate> {
    HashMap::from([
        (
            Category::PaymentIssue,
            ResponseTemplate {
                subject: "Re: Payment Issue - Financial Team",
                body: "Dear customer,\n\n\
                    We have received your request regarding the payment issue. \
                    Our financial team is already analyzing your case and working to resolve the situation as quickly as possible. \
                    We understand the importance of this matter and will prioritize your service.\n\n\
                    A specialist from the financial department will contact you within 24 hours with a solution \
                    or with the next steps needed to regularize the situation.\n\n\
                    Thank you for your understanding and patience.\n\n\
                    Best regards,\n\
                    Financial Support Team",
            },
        ),
        (
            Category::TechnicalSupport,
            ResponseTemplate {
                subject: "Re: Technical Support - Analysis in Progress",
                body: "Dear customer,\n\n\
                    Thank you for reporting the technical issue. Our engineering team has already started \
                    a detailed investigation of the case you described. We understand how this may impact \
                    your experience with our product.\n\n\
                    We are working to identify the root cause and implement a solution. \
                    You will receive updates on the progress, and as soon as we resolve it, \
                    we will contact you immediately.\n\n\
                    In the meantime, if you have any additional information that could help us, \
                    feel free to reply to this email.\n\n\
                    Best regards,\n\
                    Technical Support Team",
            },
        ),
        (
            Category::InformationRequest,
            ResponseTemplate {
                subject: "Re: Your Information Request",
                body: "Hello,\n\n\
                    Thank you for your interest! We have received your information request \
                    and will be happy to help you with the details you need.\n\n\
                    Our customer service team is preparing a complete and detailed response \
                    to your question. You will receive all the requested information shortly, \
                    along with additional materials that may be useful.\n\n\
                    If you have other questions in the meantime, don't hesitate to contact us.\n\n\
                    Best regards,\n\
                    Customer Service Team",
            },
        ),
        (
            Category::Greeting,
            ResponseTemplate {
                subject: "Re: Your Message",
                body: "Hello,\n\n\
                    We really appreciate your contact and kind words! \
                    It's always a pleasure to hear from our customers.\n\n\
                    We wish you all the best as well!\n\n\
                    Best regards,\n\
                    Support Team",
            },
        ),
        (
            Category::Complaint,
            ResponseTemplate {
                subject: "Re: Your Feedback - High Priority",
                body: "Dear customer,\n\n\
                    We deeply regret the negative experience you had. \
                    Your feedback is extremely important to us and we take all complaints very seriously.\n\n\
                    Your situation has been escalated to our management with high priority. \
                    We are committed to resolving this issue and ensuring your experience improves significantly. \
                    A supervisor will personally contact you within 12 hours to discuss an appropriate solution.\n\n\
                    Thank you for the opportunity to make this right.\n\n\
                    Best regards,\n\
                    Customer Service Management",
            },
        ),
        (
            Category::Spam,
            ResponseTemplate {
                subject: "Re: Message Received",
                body: "Hello,\n\n\
                    Thank you for reaching out.\n\n\
                    Best regards,\n\
                    Support Team",
            },
        ),
    ])
}
