//! User-facing texts and fixed prompts.

use crate::messaging::types::{InlineButton, InlineKeyboard};

pub const CLEARED: &str = "✅ История диалога очищена. Начнем сначала!";
pub const ANALYZING_SITE: &str = "🔍 Анализирую сайт...";
pub const ANALYZING_IMAGE: &str = "🖼 Анализирую изображение...";
pub const ANALYZING_DOCUMENT: &str = "📄 Анализирую документ...";
pub const GENERIC_FAILURE: &str =
    "😔 Извините, произошла ошибка. Попробуйте еще раз или используйте /clear для очистки истории.";
pub const PROMPT_TOO_LARGE: &str =
    "✂️ Сообщение слишком длинное. Сократите запрос или используйте /clear для очистки истории.";

const UPSTREAM_FAILURE_PREFIX: &str = "😔 Извините, произошла ошибка при обращении к ИИ: ";

const DEFAULT_IMAGE_CAPTION: &str = "Проанализируй это маркетинговое изображение";
const DEFAULT_DOCUMENT_CAPTION: &str = "Проанализируй этот документ с точки зрения маркетинга";
const DEFAULT_DOCUMENT_NAME: &str = "без названия";

/// Example requests offered as inline buttons on `/start`.
pub const EXAMPLES: &[(&str, &str, &str)] = &[
    (
        "example_competitors",
        "📊 Анализ конкурентов",
        "Проанализируй конкурентов в нише онлайн-образования для предпринимателей. Какие маркетинговые стратегии они используют и как можно выделиться?",
    ),
    (
        "example_copy",
        "✍️ Помощь с копирайтингом",
        "Помоги написать продающий текст для лендинга SaaS-продукта для автоматизации маркетинга в малом бизнесе.",
    ),
    (
        "example_ideas",
        "💡 Идеи для контента",
        "Предложи 10 идей для контента в Instagram для бренда экологичной косметики.",
    ),
    (
        "example_strategy",
        "🎯 Маркетинг-стратегия",
        "Создай маркетинговую стратегию запуска нового мобильного приложения для фитнеса с бюджетом $5000.",
    ),
];

/// Example prompt text for a button identifier.
pub fn example_prompt(id: &str) -> Option<&'static str> {
    EXAMPLES
        .iter()
        .find(|(key, _, _)| *key == id)
        .map(|(_, _, text)| *text)
}

/// Reply sent when an example button is pressed.
pub fn example_reply(text: &str) -> String {
    format!(
        "📝 Пример запроса:\n\n{text}\n\n💬 Можете скопировать и отправить этот запрос или написать свой!"
    )
}

pub fn start_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(
        EXAMPLES
            .iter()
            .map(|(id, label, _)| InlineButton {
                label: label.to_string(),
                callback_data: id.to_string(),
            })
            .collect(),
    )
}

pub fn welcome(first_name: &str) -> String {
    format!(
        "👋 Привет, {first_name}!

Я - ИИ-помощник по Digital Marketing. Помогу вам с:

🎯 Маркетинговой стратегией
📝 Копирайтингом и контентом
📊 Анализом конкурентов
🌐 SEO оптимизацией
📱 SMM стратегией
📧 Email-маркетингом
💡 Креативными идеями

Могу анализировать:
✅ Тексты (рекламные объявления, посты, письма)
✅ Изображения (баннеры, креативы)
✅ Веб-сайты (по ссылке)
✅ Документы (PDF, Word)

Просто отправьте мне свой материал или задайте вопрос!

Команды:
/start - Главное меню
/clear - Очистить историю диалога
/help - Помощь и примеры"
    )
}

pub const HELP: &str = "🔍 КАК ПОЛЬЗОВАТЬСЯ БОТОМ:

1️⃣ АНАЛИЗ ТЕКСТА:
Просто отправьте мне текст рекламного объявления, поста или письма.
Пример: \"Проанализируй этот текст для Instagram: [ваш текст]\"

2️⃣ АНАЛИЗ САЙТА:
Отправьте ссылку на сайт.
Пример: \"Проанализируй сайт https://example.com\"

3️⃣ АНАЛИЗ ИЗОБРАЖЕНИЯ:
Отправьте изображение баннера, креатива или объявления.
Я проанализирую дизайн и дам рекомендации.

4️⃣ ВОПРОСЫ И КОНСУЛЬТАЦИИ:
\"Как улучшить конверсию на лендинге?\"
\"Какие каналы продвижения лучше для стартапа?\"
\"Помоги создать контент-план на месяц\"

5️⃣ ГЕНЕРАЦИЯ КОНТЕНТА:
\"Напиши 5 постов для Instagram про [тема]\"
\"Создай заголовки для email-рассылки про [продукт]\"

💡 Совет: Чем конкретнее вопрос, тем полезнее ответ!";

pub fn upstream_failure(detail: &str) -> String {
    format!(
        "{UPSTREAM_FAILURE_PREFIX}{}",
        crate::formatting::truncate_text(detail, 200)
    )
}

fn caption_or<'a>(caption: Option<&'a str>, default: &'a str) -> &'a str {
    caption
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(default)
}

/// Fixed image-review prompt. Pixel content is not sent to the model.
pub fn photo_prompt(caption: Option<&str>) -> String {
    let caption = caption_or(caption, DEFAULT_IMAGE_CAPTION);
    format!(
        "Пользователь отправил изображение с запросом: {caption}

Это изображение связано с маркетингом (может быть баннер, креатив, объявление, дизайн сайта).

Проанализируй изображение по следующим критериям:
1. Общее впечатление и визуальная привлекательность
2. Читаемость текста и его эффективность
3. Цветовая схема и её влияние
4. Композиция и фокусные точки
5. Call-to-Action (если есть)
6. Целевая аудитория
7. Рекомендации по улучшению

Дай конкретные советы для улучшения конверсии."
    )
}

/// Generic document-advice prompt. Document content is not inspected.
pub fn document_prompt(file_name: Option<&str>, caption: Option<&str>) -> String {
    let caption = caption_or(caption, DEFAULT_DOCUMENT_CAPTION);
    let file_name = caption_or(file_name, DEFAULT_DOCUMENT_NAME);
    format!(
        "Пользователь отправил документ \"{file_name}\" с запросом: {caption}

Дай общие рекомендации по работе с маркетинговыми документами:
1. Что важно проверить в маркетинговых материалах
2. Как структурировать маркетинговый документ
3. Ключевые элементы эффективного маркетингового контента
4. Типичные ошибки в маркетинговых документах"
    )
}
