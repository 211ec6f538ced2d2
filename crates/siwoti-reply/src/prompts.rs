//! Localized prompt templates.

use siwoti_protocols::{ArticleContext, Tone};

use crate::language::Language;

/// Article bodies are cut to this many characters before prompting.
pub const ARTICLE_CONTENT_MAX_CHARS: usize = 1500;

/// Prompt template for one language.
///
/// `user` carries the `{tone}` and `{comment}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub system: &'static str,
    pub user: &'static str,
    /// Tone words for funny, sarcastic and mild.
    pub tones: [&'static str; 3],
    pub article_heading: &'static str,
    pub title_label: &'static str,
    pub content_label: &'static str,
}

impl Template {
    pub fn tone_word(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Funny => self.tones[0],
            Tone::Sarcastic => self.tones[1],
            Tone::Mild => self.tones[2],
        }
    }
}

const EN: Template = Template {
    system: "You are a witty, concise assistant that writes short gotcha-style replies to internet comments. Keep replies between 10 and 60 words. Reply in English.",
    user: "Write a {tone} reply to this comment:\n\n\"\"\"\n{comment}\n\"\"\"\n\nKeep it short, humorous, and not abusive.",
    tones: ["funny", "sarcastic", "mild"],
    article_heading: "The comment was posted under this article:",
    title_label: "Title",
    content_label: "Content",
};

const DE: Template = Template {
    system: "Du bist ein witziger, prägnanter Assistent, der kurze, schlagfertige Antworten auf Internetkommentare schreibt. Halte Antworten zwischen 10 und 60 Wörtern. Antworte auf Deutsch.",
    user: "Schreibe eine {tone} Antwort auf diesen Kommentar:\n\n\"\"\"\n{comment}\n\"\"\"\n\nHalte sie kurz, humorvoll und nicht beleidigend.",
    tones: ["lustige", "sarkastische", "milde"],
    article_heading: "Der Kommentar wurde unter diesem Artikel gepostet:",
    title_label: "Titel",
    content_label: "Inhalt",
};

const FR: Template = Template {
    system: "Tu es un assistant spirituel et concis qui écrit de courtes répliques percutantes aux commentaires sur Internet. Garde les réponses entre 10 et 60 mots. Réponds en français.",
    user: "Écris une réponse {tone} à ce commentaire :\n\n\"\"\"\n{comment}\n\"\"\"\n\nReste bref, drôle et jamais injurieux.",
    tones: ["drôle", "sarcastique", "douce"],
    article_heading: "Le commentaire a été publié sous cet article :",
    title_label: "Titre",
    content_label: "Contenu",
};

const ES: Template = Template {
    system: "Eres un asistente ingenioso y conciso que escribe respuestas breves y mordaces a comentarios de internet. Mantén las respuestas entre 10 y 60 palabras. Responde en español.",
    user: "Escribe una respuesta {tone} a este comentario:\n\n\"\"\"\n{comment}\n\"\"\"\n\nQue sea breve, con humor y sin insultos.",
    tones: ["divertida", "sarcástica", "suave"],
    article_heading: "El comentario se publicó bajo este artículo:",
    title_label: "Título",
    content_label: "Contenido",
};

const IT: Template = Template {
    system: "Sei un assistente arguto e conciso che scrive brevi risposte pungenti ai commenti su internet. Mantieni le risposte tra 10 e 60 parole. Rispondi in italiano.",
    user: "Scrivi una risposta {tone} a questo commento:\n\n\"\"\"\n{comment}\n\"\"\"\n\nMantienila breve, spiritosa e non offensiva.",
    tones: ["divertente", "sarcastica", "gentile"],
    article_heading: "Il commento è stato pubblicato sotto questo articolo:",
    title_label: "Titolo",
    content_label: "Contenuto",
};

const PT: Template = Template {
    system: "Você é um assistente espirituoso e conciso que escreve respostas curtas e afiadas a comentários na internet. Mantenha as respostas entre 10 e 60 palavras. Responda em português.",
    user: "Escreva uma resposta {tone} a este comentário:\n\n\"\"\"\n{comment}\n\"\"\"\n\nSeja breve, bem-humorado e nada ofensivo.",
    tones: ["engraçada", "sarcástica", "suave"],
    article_heading: "O comentário foi publicado neste artigo:",
    title_label: "Título",
    content_label: "Conteúdo",
};

const ZH: Template = Template {
    system: "你是一个机智、简洁的助手，擅长为网络评论写简短有力的回复。回复保持在10到60个字之间。请用中文回复。",
    user: "请用{tone}的语气回复这条评论：\n\n\"\"\"\n{comment}\n\"\"\"\n\n保持简短、幽默，不要辱骂。",
    tones: ["幽默", "讽刺", "温和"],
    article_heading: "该评论发布在以下文章下：",
    title_label: "标题",
    content_label: "内容",
};

const JA: Template = Template {
    system: "あなたはネット上のコメントに短く気の利いた返信を書く、機知に富んだ簡潔なアシスタントです。返信は10〜60語程度にしてください。日本語で返信してください。",
    user: "このコメントに{tone}な返信を書いてください：\n\n\"\"\"\n{comment}\n\"\"\"\n\n短く、ユーモラスに、攻撃的にならないように。",
    tones: ["ユーモア", "皮肉", "穏やか"],
    article_heading: "このコメントは次の記事に投稿されました：",
    title_label: "タイトル",
    content_label: "本文",
};

const AR: Template = Template {
    system: "أنت مساعد ذكي وموجز يكتب ردودًا قصيرة ولاذعة على تعليقات الإنترنت. اجعل الردود بين 10 و60 كلمة. أجب باللغة العربية.",
    user: "اكتب ردًا {tone} على هذا التعليق:\n\n\"\"\"\n{comment}\n\"\"\"\n\nاجعله قصيرًا وطريفًا وغير مسيء.",
    tones: ["مضحكًا", "ساخرًا", "لطيفًا"],
    article_heading: "نُشر التعليق تحت هذا المقال:",
    title_label: "العنوان",
    content_label: "المحتوى",
};

const HI: Template = Template {
    system: "आप एक चतुर और संक्षिप्त सहायक हैं जो इंटरनेट टिप्पणियों के छोटे, तीखे जवाब लिखते हैं। जवाब 10 से 60 शब्दों के बीच रखें। हिंदी में जवाब दें।",
    user: "इस टिप्पणी का एक {tone} जवाब लिखें:\n\n\"\"\"\n{comment}\n\"\"\"\n\nइसे छोटा, मज़ेदार और गैर-अपमानजनक रखें।",
    tones: ["मज़ेदार", "व्यंग्यात्मक", "नरम"],
    article_heading: "यह टिप्पणी इस लेख के नीचे पोस्ट की गई थी:",
    title_label: "शीर्षक",
    content_label: "सामग्री",
};

const BN: Template = Template {
    system: "আপনি একজন বুদ্ধিদীপ্ত ও সংক্ষিপ্ত সহকারী, যিনি ইন্টারনেট মন্তব্যের ছোট ও তীক্ষ্ণ উত্তর লেখেন। উত্তর ১০ থেকে ৬০ শব্দের মধ্যে রাখুন। বাংলায় উত্তর দিন।",
    user: "এই মন্তব্যের একটি {tone} উত্তর লিখুন:\n\n\"\"\"\n{comment}\n\"\"\"\n\nছোট, মজার এবং অপমানজনক নয় এমন রাখুন।",
    tones: ["মজার", "ব্যঙ্গাত্মক", "নম্র"],
    article_heading: "মন্তব্যটি এই নিবন্ধের নিচে পোস্ট করা হয়েছিল:",
    title_label: "শিরোনাম",
    content_label: "বিষয়বস্তু",
};

const RU: Template = Template {
    system: "Ты остроумный и лаконичный помощник, который пишет короткие меткие ответы на комментарии в интернете. Ответ должен быть от 10 до 60 слов. Отвечай на русском языке.",
    user: "Напиши {tone} ответ на этот комментарий:\n\n\"\"\"\n{comment}\n\"\"\"\n\nБудь краток, с юмором и без оскорблений.",
    tones: ["смешной", "саркастичный", "мягкий"],
    article_heading: "Комментарий опубликован под этой статьёй:",
    title_label: "Заголовок",
    content_label: "Содержание",
};

pub fn template(language: Language) -> &'static Template {
    match language {
        Language::En => &EN,
        Language::De => &DE,
        Language::Fr => &FR,
        Language::Es => &ES,
        Language::It => &IT,
        Language::Pt => &PT,
        Language::Zh => &ZH,
        Language::Ja => &JA,
        Language::Ar => &AR,
        Language::Hi => &HI,
        Language::Bn => &BN,
        Language::Ru => &RU,
    }
}

/// Rendered system and user prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Render the prompt pair for a comment.
pub fn render(
    language: Language,
    comment: &str,
    tone: Tone,
    article: Option<&ArticleContext>,
) -> Prompt {
    let template = template(language);
    let mut user = template
        .user
        .replace("{tone}", template.tone_word(tone))
        .replace("{comment}", comment);

    if let Some(article) = article.filter(|a| !a.title.trim().is_empty()) {
        user.push_str("\n\n");
        user.push_str(template.article_heading);
        user.push_str(&format!("\n{}: {}", template.title_label, article.title.trim()));
        let content = article.content.trim();
        if !content.is_empty() {
            let excerpt: String = content.chars().take(ARTICLE_CONTENT_MAX_CHARS).collect();
            user.push_str(&format!("\n{}: {}", template.content_label, excerpt));
        }
    }

    Prompt {
        system: template.system.to_string(),
        user,
    }
}
