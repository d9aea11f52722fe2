/*
 * @Author       : 老董
 * @Description  : 基线融合模型的端到端测试：由 JSON 配置构建模型，外部优化器通过参数的可变引用
 *                 （有限差分梯度）更新分类层，损失应随之下降
 */
use only_vqa::assert_err;
use only_vqa::nn::{Batch, ForwardMode, ModelError, ModelKind, Module, VqaConfig, VqaModel};
use only_vqa::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

const CONFIG: &str = r#"{
    "batch_size": 4,
    "img_dim": 3,
    "hidden_dim": 4,
    "rnn_size": 2,
    "rnn_layer": 1,
    "init_bound": 0.3,
    "num_output": 4,
    "ans_vocab_size": 4,
    "dropout_rate": 0.2,
    "seed": 2024
}"#;

fn toy_batch() -> Batch {
    // 第i个样本的答案为i，图像与问题均按答案稍作区分
    let image = Tensor::new(
        &[
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, //
            1.0, 1.0, 1.0,
        ],
        &[4, 3],
    );
    let question = Tensor::new(
        &[
            0.5, 0.1, 0.2, 0.3, //
            0.2, 0.5, 0.1, 0.3, //
            0.3, 0.2, 0.5, 0.1, //
            0.1, 0.3, 0.2, 0.5,
        ],
        &[4, 4],
    );
    let mut labels = Tensor::zeros(&[4, 4]);
    for i in 0..4 {
        labels[[i, i]] = 1.0;
    }
    Batch::new(image, question, labels)
}

fn eval_loss(model: &VqaModel, batch: &Batch) -> f32 {
    model
        .forward(batch, ForwardMode::Eval, &mut StdRng::seed_from_u64(0))
        .unwrap()
        .loss
}

#[test]
fn test_baseline_loss_decreases_with_external_updates() {
    let config = VqaConfig::from_json_str(CONFIG).unwrap();
    let mut model = VqaModel::build(ModelKind::Baseline, &config).unwrap();
    let batch = toy_batch();
    let initial_loss = eval_loss(&model, &batch);

    let (eps, lr) = (1e-2, 0.2);
    for _ in 0..30 {
        for name in ["score_W", "score_b"] {
            let current = model.parameter(name).unwrap().clone();
            let values = current.to_vec();
            let mut gradient = vec![0.0; values.len()];
            for (i, g) in gradient.iter_mut().enumerate() {
                let mut plus = values.clone();
                plus[i] += eps;
                model.set_parameter(name, Tensor::new(&plus, current.shape())).unwrap();
                let loss_plus = eval_loss(&model, &batch);
                let mut minus = values.clone();
                minus[i] -= eps;
                model.set_parameter(name, Tensor::new(&minus, current.shape())).unwrap();
                let loss_minus = eval_loss(&model, &batch);
                *g = (loss_plus - loss_minus) / (2.0 * eps);
            }
            let updated = values
                .iter()
                .zip(&gradient)
                .map(|(v, g)| v - lr * g)
                .collect::<Vec<_>>();
            model.set_parameter(name, Tensor::new(&updated, current.shape())).unwrap();
        }
    }

    let final_loss = eval_loss(&model, &batch);
    assert!(
        final_loss < initial_loss,
        "损失未下降：{initial_loss} -> {final_loss}"
    );
}

#[test]
fn test_baseline_train_mode_batches() {
    let config = VqaConfig::from_json_str(CONFIG).unwrap();
    let model = VqaModel::build(ModelKind::Baseline, &config).unwrap();
    let batch = toy_batch();
    let mut rng = StdRng::seed_from_u64(1);
    // 同一个随机源连续前向，每次的 dropout 掩码都不同，但输出始终有效
    for _ in 0..5 {
        let output = model.forward(&batch, ForwardMode::Train, &mut rng).unwrap();
        assert!(output.loss.is_finite());
        assert!((0.0..=1.0).contains(&output.accuracy));
        assert_eq!(output.predictions.len(), batch.len());
    }
}

#[test]
fn test_baseline_rejects_mismatched_question_state() {
    let config = VqaConfig::from_json_str(CONFIG).unwrap();
    let model = VqaModel::build(ModelKind::Baseline, &config).unwrap();
    let batch = toy_batch();
    let wrong = Batch::new(batch.image.clone(), Tensor::zeros(&[4, 3]), batch.labels.clone());
    assert_err!(
        model.forward(&wrong, ForwardMode::Eval, &mut StdRng::seed_from_u64(0)),
        ModelError::ShapeMismatch([4, 4], [4, 3])
    );
}
